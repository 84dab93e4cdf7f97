use std::{fmt, io::Read, sync::Arc};
use super::{error::*, flags::Flags};

/// Stand-alone metadata for a container entry. This can be fetched without reading the entry's data.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
	/// The id under which the entry's data is referenced
	pub id: Arc<str>,
	/// The flags extracted from the container entry and parsed into an accessible struct
	pub flags: Flags,
	/// The content version of the extracted container entry
	pub content_version: u8,
	/// The location of the entry's data, as an offset of bytes from the beginning of the container
	pub location: u64,
	/// The size of the entry's data in the container, in bytes. The size of the data may vary once processed, ie when decompressed
	pub offset: u64,
}

impl RegistryEntry {
	// 4(flags) + 1(content version) + 8(location) + 8(offset) + 2(id length) + ..Dynamic
	pub(crate) const MIN_SIZE: usize = Flags::BYTES + 19;

	#[inline(always)]
	pub(crate) fn empty() -> RegistryEntry {
		RegistryEntry {
			id: Arc::from("None"),
			flags: Flags::new(),
			content_version: 0,
			location: 0,
			offset: 0,
		}
	}

	/// Given a read handle, will proceed to read and parse bytes into a [`RegistryEntry`] struct. (de-serialization)
	pub(crate) fn from_handle<T: Read>(mut handle: T) -> Result<RegistryEntry> {
		let mut buffer: [u8; RegistryEntry::MIN_SIZE] = [0u8; RegistryEntry::MIN_SIZE];
		handle.read_exact(&mut buffer)?;

		// Construct entry
		let flags = Flags::from_bits(u32::from_le_bytes(buffer[0..4].try_into().unwrap()));
		let content_version = buffer[4];

		let location = u64::from_le_bytes(buffer[5..13].try_into().unwrap());
		let offset = u64::from_le_bytes(buffer[13..21].try_into().unwrap());

		let id_length = u16::from_le_bytes([buffer[21], buffer[22]]);

		// Construct id
		let mut id = String::with_capacity(id_length as usize);
		handle.take(id_length as u64).read_to_string(&mut id)?;

		let entry = RegistryEntry {
			id: id.into(),
			flags,
			content_version,
			location,
			offset,
		};

		Ok(entry)
	}

	/// Serializes a [`RegistryEntry`] struct into an array of bytes
	pub(crate) fn to_bytes(&self) -> Result<Vec<u8>> {
		// Make sure the id is not too big or else it will break the container
		let id = self.id.as_ref();

		if id.len() >= crate::MAX_ID_LENGTH {
			let copy = id.to_string();
			return Err(Error::IDSizeOverflowError(copy));
		};

		let mut buffer = Vec::with_capacity(RegistryEntry::MIN_SIZE + id.len());
		let len = id.len() as u16;

		buffer.extend_from_slice(&self.flags.bits().to_le_bytes());
		buffer.extend_from_slice(&self.content_version.to_le_bytes());
		buffer.extend_from_slice(&self.location.to_le_bytes());
		buffer.extend_from_slice(&self.offset.to_le_bytes());
		buffer.extend_from_slice(&len.to_le_bytes());

		// Append id
		buffer.extend_from_slice(id.as_bytes());

		Ok(buffer)
	}
}

impl Default for RegistryEntry {
	#[inline(always)]
	fn default() -> RegistryEntry {
		RegistryEntry::empty()
	}
}

impl fmt::Display for RegistryEntry {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"[RegistryEntry] id: {}, location: {}, length: {}, content_version: {}, flags: {}",
			self.id,
			self.location,
			self.offset,
			self.content_version,
			self.flags
		)
	}
}
