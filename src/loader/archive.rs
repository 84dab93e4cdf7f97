use std::{
	io::{Read, Seek, SeekFrom},
	sync::Arc,
};

use ahash::AHashMap;
use parking_lot::Mutex;

use super::resource::Resource;
use crate::global::{
	compressor::{CompressionAlgorithm, Compressor},
	error::*,
	flags::Flags,
	header::Header,
	reg_entry::RegistryEntry,
};

/// Parses a persisted container from a read handle.
/// > Wraps the handle in a [`Mutex`] internally for shared access, use [`fetch_mut`](Archive::fetch_mut) for lock-free access.
#[derive(Debug)]
pub struct Archive<T> {
	/// Wrapping `handle` in a Mutex means that we only ever lock when reading from the underlying buffer
	handle: Mutex<T>,

	// Registry data. `entries` preserves container order, ie insertion order at
	// build time; `lookup` resolves an id to the *last* entry carrying it.
	header: Header,
	entries: Vec<RegistryEntry>,
	lookup: AHashMap<Arc<str>, usize>,
}

impl<T> std::fmt::Display for Archive<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let bytes = self.entries.iter().map(|entry| entry.offset).sum::<u64>();

		write!(
			f,
			"[Archive Header] Version: {}, Members: {}, Compressed Size: {bytes}B, Header-Flags: <{:#x} : {:#016b}>",
			self.header.version,
			self.entries.len(),
			self.header.flags.bits,
			self.header.flags.bits,
		)
	}
}

impl<T> Archive<T> {
	/// Consume the [`Archive`] and return the underlying handle
	pub fn into_inner(self) -> T {
		self.handle.into_inner()
	}

	// Decompress the data if the entry calls for it
	#[inline(never)]
	fn process(&self, entry: &RegistryEntry, raw: Vec<u8>) -> Result<Vec<u8>> {
		if entry.flags.contains(Flags::COMPRESSED_FLAG) {
			let mut target = Vec::with_capacity(raw.capacity());

			if entry.flags.contains(Flags::LZ4_COMPRESSED) {
				Compressor::new(raw.as_slice()).decompress(CompressionAlgorithm::LZ4, &mut target)?;
			} else if entry.flags.contains(Flags::BROTLI_COMPRESSED) {
				Compressor::new(raw.as_slice()).decompress(CompressionAlgorithm::Brotli(0), &mut target)?;
			} else if entry.flags.contains(Flags::SNAPPY_COMPRESSED) {
				Compressor::new(raw.as_slice()).decompress(CompressionAlgorithm::Snappy, &mut target)?;
			} else {
				return Err(Error::OtherError(
					format!("Unable to determine the compression algorithm used for entry: {}", entry).into(),
				));
			};

			Ok(target)
		} else {
			Ok(raw)
		}
	}
}

impl<T> Archive<T>
where
	T: Seek + Read,
{
	/// Parses an [`Archive`] from the given source
	pub fn new(mut handle: T) -> Result<Archive<T>> {
		// Start reading from the start of the input
		handle.seek(SeekFrom::Start(0))?;

		let header = Header::from_handle(&mut handle)?;
		header.validate()?;

		// Generate and store registry entries, in container order
		let mut entries = Vec::with_capacity(header.capacity as usize);
		let mut lookup = AHashMap::with_capacity(header.capacity as usize);

		for index in 0..header.capacity {
			let entry = RegistryEntry::from_handle(&mut handle)?;

			// a duplicate id shadows its predecessor in the lookup, both entries
			// stay reachable by index
			lookup.insert(entry.id.clone(), index as usize);
			entries.push(entry);
		}

		let archive = Archive {
			header,
			handle: Mutex::new(handle),
			entries,
			lookup,
		};

		Ok(archive)
	}

	/// Fetch a [`RegistryEntry`] from this [`Archive`] by id.
	/// This can be used for debugging, as the [`RegistryEntry`] holds information on data with the adjacent id.
	pub fn fetch_entry(&self, id: impl AsRef<str>) -> Option<RegistryEntry> {
		self.lookup
			.get(id.as_ref())
			.map(|&index| self.entries[index].clone())
	}

	/// All [`RegistryEntry`]s in this [`Archive`], in container order.
	#[inline(always)]
	pub fn entries(&self) -> &[RegistryEntry] {
		&self.entries
	}

	/// Global flags extracted from the header section of the source
	#[inline(always)]
	pub fn flags(&self) -> &Flags {
		&self.header.flags
	}

	/// Given a data source and a [`RegistryEntry`], gets the adjacent raw data
	pub(crate) fn read_raw(handle: &mut T, entry: &RegistryEntry) -> Result<Vec<u8>> {
		let mut buffer = Vec::with_capacity(entry.offset as usize + 64);
		handle.seek(SeekFrom::Start(entry.location))?;

		let mut take = handle.take(entry.offset);
		take.read_to_end(&mut buffer)?;

		Ok(buffer)
	}

	/// Fetch a [`Resource`] by its position in the container.
	/// > Locks the underlying [`Mutex`]
	pub fn fetch_at(&self, index: usize) -> Result<Resource> {
		let entry = match self.entries.get(index) {
			Some(entry) => entry.clone(),
			None => return Err(Error::MissingResourceError(format!("entry #{}", index))),
		};

		let raw = {
			let mut guard = self.handle.lock();
			Archive::read_raw(&mut *guard, &entry)?
		};

		let data = self.process(&entry, raw)?;

		Ok(Resource {
			data: data.into_boxed_slice(),
			flags: entry.flags,
			content_version: entry.content_version,
		})
	}

	/// Fetch a [`Resource`] with the given id.
	/// > Locks the underlying [`Mutex`], for a cheaper non-locking operation refer to [`fetch_mut`](Archive::fetch_mut)
	pub fn fetch(&self, id: impl AsRef<str>) -> Result<Resource> {
		match self.lookup.get(id.as_ref()) {
			Some(&index) => self.fetch_at(index),
			None => Err(Error::MissingResourceError(id.as_ref().to_string())),
		}
	}

	/// Cheaper alternative to [`fetch`](Archive::fetch) that doesn't lock the underlying [`Mutex`]
	pub fn fetch_mut(&mut self, id: impl AsRef<str>) -> Result<Resource> {
		let entry = match self.lookup.get(id.as_ref()) {
			Some(&index) => self.entries[index].clone(),
			None => return Err(Error::MissingResourceError(id.as_ref().to_string())),
		};

		let raw = Archive::read_raw(self.handle.get_mut(), &entry)?;
		let data = self.process(&entry, raw)?;

		Ok(Resource {
			data: data.into_boxed_slice(),
			flags: entry.flags,
			content_version: entry.content_version,
		})
	}
}
