use crate::global::{reg_entry::RegistryEntry, flags::Flags};
use crate::global::error::Result;
use crate::global::compressor::{CompressionAlgorithm, Compressor};

use std::{io::Read, sync::Arc};

/// Configures how a [`Leaf`] should be compressed.
#[derive(Debug, Clone, Copy, Default)]
pub enum CompressMode {
	/// The data is never compressed and is embedded as is.
	#[default]
	Never,
	/// The data will always be compressed
	Always,
	/// The compressed data is used, only if it is smaller than the original data.
	Detect,
}

/// A named ([`id`](Leaf::id)) wrapper around an [`io::Read`](Read) handle, tagged with extra metadata.
#[derive(Debug, Default, Clone)]
pub struct Leaf<R = &'static [u8]> {
	/// source data
	pub handle: R,

	/// The id under which the embedded data will be referenced
	pub id: Arc<str>,
	/// The version of the content, allowing you to track obsolete data.
	pub content_version: u8,
	/// The flags that will go into the container write target.
	pub flags: Flags,

	/// How a [`Leaf`] should be compressed
	pub compress: CompressMode,
	/// The specific compression algorithm to use
	pub compression_algo: CompressionAlgorithm,
}

impl<R: Read> Leaf<R> {
	/// Creates a new [`Leaf`] wrapping around the given [`Read`] handle, with an id
	pub fn new<S: AsRef<str>>(handle: R, id: S) -> Leaf<R> {
		let default = Leaf::<&'static [u8]>::default();

		Leaf {
			handle,
			id: Arc::from(id.as_ref()),

			// copy from default implementation
			content_version: default.content_version,
			flags: default.flags,
			compress: default.compress,
			compression_algo: default.compression_algo,
		}
	}

	/// Copy all fields from another [`Leaf`], except for `handle` and `id`.
	pub fn template<R2>(self, other: &Leaf<R2>) -> Self {
		Leaf {
			handle: self.handle,
			id: self.id,

			content_version: other.content_version,
			flags: other.flags,
			compress: other.compress,
			compression_algo: other.compression_algo,
		}
	}

	/// Setter for the [`compress`](Leaf::compress) field
	pub fn compress(mut self, compress: CompressMode) -> Self {
		self.compress = compress;
		self
	}

	/// Setter for the [`content_version`](Leaf::content_version) field
	pub fn version(mut self, content_version: u8) -> Self {
		self.content_version = content_version;
		self
	}

	/// Setter for the [`flags`](Leaf::flags) field
	pub fn flags(mut self, flags: Flags) -> Self {
		self.flags = flags;
		self
	}

	/// Setter for the [`compression_algo`](Leaf::compression_algo) field
	pub fn compression_algo(mut self, compression_algo: CompressionAlgorithm) -> Self {
		self.compression_algo = compression_algo;
		self
	}
}

impl<R> From<&mut Leaf<R>> for RegistryEntry {
	fn from(leaf: &mut Leaf<R>) -> Self {
		RegistryEntry {
			id: leaf.id.clone(),
			flags: leaf.flags,
			content_version: leaf.content_version,
			..RegistryEntry::empty()
		}
	}
}

// Processed data ready to be inserted into the write target during building
pub(crate) struct ProcessedLeaf {
	pub(crate) data: Vec<u8>,
	pub(crate) entry: RegistryEntry,
}

// Process a Leaf into data ready for insertion
#[inline(never)]
pub(crate) fn process_leaf<R: Read>(leaf: &mut Leaf<R>) -> Result<ProcessedLeaf> {
	let mut entry: RegistryEntry = leaf.into();
	let mut raw = Vec::new();

	// Compression comes first
	match leaf.compress {
		CompressMode::Never => {
			leaf.handle.read_to_end(&mut raw)?;
		},
		CompressMode::Always => {
			Compressor::new(&mut leaf.handle).compress(leaf.compression_algo, &mut raw)?;

			entry.flags.force_set(Flags::COMPRESSED_FLAG, true);
			entry.flags.force_set(leaf.compression_algo.into(), true);
		},
		CompressMode::Detect => {
			let mut buffer = Vec::new();
			leaf.handle.read_to_end(&mut buffer)?;

			let mut compressed_data = Vec::new();
			Compressor::new(buffer.as_slice()).compress(leaf.compression_algo, &mut compressed_data)?;

			if compressed_data.len() <= buffer.len() {
				entry.flags.force_set(Flags::COMPRESSED_FLAG, true);
				entry.flags.force_set(leaf.compression_algo.into(), true);

				raw = compressed_data;
			} else {
				raw = buffer;
			};
		},
	}

	Ok(ProcessedLeaf { data: raw, entry })
}
