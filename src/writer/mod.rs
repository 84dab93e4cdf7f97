use std::io::{Read, Seek, SeekFrom, Write};

mod config;
mod leaf;

pub use config::BuilderConfig;
pub use leaf::{CompressMode, Leaf};

use leaf::process_leaf;

use crate::global::error::*;
use crate::global::{header::Header, reg_entry::RegistryEntry};

/// Iterates over all [`Leaf`]s in the given slice, processes them and writes the bytes out into the target.
/// Custom header flags are set using the [`BuilderConfig`] struct.
///
/// Entries appear in the container in slice order. Duplicate ids are written as-is:
/// the container is enumerable by index, and id-based fetches on the loader side
/// resolve to the last entry carrying the id.
///
/// Returns the total number of bytes written into the target.
pub fn dump<W: Write + Seek, R: Read>(
	mut target: W, leaves: &mut [Leaf<R>], config: &BuilderConfig,
	mut callback: Option<&mut dyn FnMut(&RegistryEntry, &[u8])>,
) -> Result<u64> {
	// Calculate the size of the registry, data blobs are written directly after it
	let mut leaf_offset = {
		leaves
			.iter()
			.map(|leaf| leaf.id.len() + RegistryEntry::MIN_SIZE)
			.sum::<usize>()
			+ Header::BASE_SIZE
	} as u64;

	// Start at the very start of the file
	target.seek(SeekFrom::Start(0))?;

	let header = Header {
		magic: crate::MAGIC,
		flags: config.flags,
		version: crate::VERSION,
		capacity: leaves.len() as u16,
	};

	target.write_all(&header.to_bytes())?;

	// Buffer for the registry section, written out once all leaves are processed
	let mut registry = Vec::with_capacity(leaf_offset as usize - Header::BASE_SIZE);

	for leaf in leaves.iter_mut() {
		let mut processed = process_leaf(leaf)?;
		let bytes = processed.data.len() as u64;

		// write
		target.seek(SeekFrom::Start(leaf_offset))?;
		target.write_all(&processed.data)?;

		// update entry
		processed.entry.location = leaf_offset;
		processed.entry.offset = bytes;

		leaf_offset += bytes;

		// write to the registry buffer
		let entry_bytes = processed.entry.to_bytes()?;
		registry.write_all(&entry_bytes)?;

		// Call the progress callback, if any
		if let Some(callback) = callback.as_mut() {
			callback(&processed.entry, &processed.data);
		}
	}

	// write out the registry
	target.seek(SeekFrom::Start(Header::BASE_SIZE as _))?;
	target.write_all(&registry)?;

	// data is laid out contiguously after the registry, so the final write
	// offset equals the total container size
	Ok(leaf_offset)
}
