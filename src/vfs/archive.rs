use std::{fs::File, path::Path, sync::Arc};

use ahash::AHashMap;

use super::contract::{ArchiveReader, FileInfo};
use super::SharedVirtualArchive;
use crate::global::compressor::CompressionAlgorithm;
use crate::writer::{dump, BuilderConfig, CompressMode, Leaf};

/// An in-memory named byte blob owned by a [`VirtualArchive`].
#[derive(Debug)]
pub struct VirtualFile {
	index: u32,
	name: String,

	/// File contents. Public so the generating subsystem can populate the data
	/// incrementally, the way a real file would be written to.
	pub buffer: Vec<u8>,
}

impl VirtualFile {
	/// Position of this file within its owning archive, stable from creation.
	#[inline(always)]
	pub fn index(&self) -> u32 {
		self.index
	}

	/// Archive-relative path of this file.
	#[inline(always)]
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// An ordered, append-only collection of [`VirtualFile`]s that presents the same
/// read interface as an on-disk archive, without requiring prior serialization.
///
/// Lookup by name goes through a case-folded name index. Adding a second file
/// under an already-used name is permitted: the later file shadows the earlier
/// one in the name index, while the earlier one stays reachable by its index.
#[derive(Debug, Default)]
pub struct VirtualArchive {
	name: String,
	files: Vec<VirtualFile>,
	name_index: AHashMap<String, u32>,
}

impl VirtualArchive {
	/// Creates an empty archive with the given logical name (no extension).
	pub fn new<S: AsRef<str>>(name: S) -> VirtualArchive {
		VirtualArchive {
			name: name.as_ref().to_string(),
			files: Vec::new(),
			name_index: AHashMap::new(),
		}
	}

	/// The logical name this archive was registered under, without extension.
	#[inline(always)]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Number of files in this archive.
	#[inline(always)]
	pub fn num_files(&self) -> u32 {
		self.files.len() as u32
	}

	/// Appends a new empty file named `name` and returns its index.
	///
	/// Indices are dense: the n-th call returns `n - 1`. No name validation is
	/// performed, see the type-level notes on duplicates.
	pub fn add_file<S: AsRef<str>>(&mut self, name: S) -> u32 {
		let name = name.as_ref();
		let index = self.files.len() as u32;

		self.name_index.insert(name.to_lowercase(), index);
		self.files.push(VirtualFile {
			index,
			name: name.to_string(),
			buffer: Vec::new(),
		});

		index
	}

	/// The file at `fid`, if any.
	pub fn file(&self, fid: u32) -> Option<&VirtualFile> {
		self.files.get(fid as usize)
	}

	/// Mutable access to the file at `fid`, for populating its buffer.
	pub fn file_mut(&mut self, fid: u32) -> Option<&mut VirtualFile> {
		self.files.get_mut(fid as usize)
	}

	/// Copies the contents of the file `fid` into `buffer`, replacing its contents.
	/// Returns `false` and leaves `buffer` untouched when `fid` is out of range.
	pub fn get_file(&self, fid: u32, buffer: &mut Vec<u8>) -> bool {
		match self.files.get(fid as usize) {
			Some(file) => {
				buffer.clear();
				buffer.extend_from_slice(&file.buffer);
				true
			},
			None => false,
		}
	}

	/// Archive-relative path of the file `fid`.
	///
	/// # Panics
	/// When `fid` is out of range, only pass ids below [`num_files`](VirtualArchive::num_files).
	pub fn file_name(&self, fid: u32) -> &str {
		&self.files[fid as usize].name
	}

	/// Current size in bytes of the file `fid`.
	///
	/// # Panics
	/// When `fid` is out of range, only pass ids below [`num_files`](VirtualArchive::num_files).
	pub fn file_size(&self, fid: u32) -> i32 {
		self.files[fid as usize].buffer.len() as i32
	}

	/// [`FileInfo`] for the file `fid`. Virtual entries report no special name
	/// and a modification time of `0`.
	///
	/// # Panics
	/// When `fid` is out of range, only pass ids below [`num_files`](VirtualArchive::num_files).
	pub fn file_info(&self, fid: u32) -> FileInfo {
		let file = &self.files[fid as usize];

		FileInfo {
			name: file.name.clone(),
			special_name: String::new(),
			size: file.buffer.len() as i32,
			mod_time: 0,
		}
	}

	/// Resolves a name to a file index through the live name index, case-insensitively.
	/// With duplicate names, resolves to the most recently added file.
	pub fn resolve(&self, name: &str) -> Option<u32> {
		self.name_index.get(&name.to_lowercase()).copied()
	}

	/// The live case-folded name index. Handles clone this at open time.
	#[inline(always)]
	pub fn name_index(&self) -> &AHashMap<String, u32> {
		&self.name_index
	}

	/// Serializes every contained file into a newly created container at
	/// `<write_dir>/<name>.varc`, each file as its own entry at maximum
	/// compression, in insertion order.
	///
	/// Non-destructive: the archive stays usable and may be persisted again.
	/// Failures are logged and reported as `false`, never mutating in-memory
	/// state, so the call may simply be retried.
	pub fn persist(&self, write_dir: &Path) -> bool {
		let path = write_dir.join(format!("{}.{}", self.name, crate::CONTAINER_EXTENSION));
		log::info!("writing virtual archive \"{}\" to {}", self.name, path.display());

		let target = match File::create(&path) {
			Ok(file) => file,
			Err(err) => {
				log::error!("could not open {} for writing: {}", path.display(), err);
				return false;
			},
		};

		let mut leaves = self
			.files
			.iter()
			.map(|file| {
				Leaf::new(file.buffer.as_slice(), &file.name)
					.compress(CompressMode::Always)
					.compression_algo(CompressionAlgorithm::Brotli(11))
			})
			.collect::<Vec<_>>();

		match dump(target, &mut leaves, &BuilderConfig::default(), None) {
			Ok(written) => {
				log::trace!("wrote {} files, {} bytes", self.files.len(), written);
				true
			},
			Err(err) => {
				log::error!("failed to serialize virtual archive \"{}\": {}", self.name, err);
				false
			},
		}
	}
}

/// A lightweight read session over one [`VirtualArchive`], handed out by
/// [`VirtualArchiveRegistry::open_by_file_name`](super::VirtualArchiveRegistry::open_by_file_name).
///
/// The name index is cloned once at open time, so name → id resolution stays
/// stable for the handle's lifetime even if the archive appends more files
/// elsewhere. Everything else forwards to the live archive under a read lock;
/// a handle never mutates, and any number of handles may be open at once.
#[derive(Debug)]
pub struct VirtualArchiveHandle {
	archive: SharedVirtualArchive,
	name_index: AHashMap<String, u32>,
}

impl VirtualArchiveHandle {
	/// Opens a new read session. Cheap: clones the name index, copies no file data.
	pub fn open(archive: &SharedVirtualArchive) -> VirtualArchiveHandle {
		let name_index = archive.read().name_index().clone();

		VirtualArchiveHandle {
			archive: Arc::clone(archive),
			name_index,
		}
	}

	/// The shared archive this handle reads from.
	#[inline(always)]
	pub fn archive(&self) -> &SharedVirtualArchive {
		&self.archive
	}
}

impl ArchiveReader for VirtualArchiveHandle {
	fn num_files(&self) -> u32 {
		self.archive.read().num_files()
	}

	fn get_file(&self, fid: u32, buffer: &mut Vec<u8>) -> bool {
		self.archive.read().get_file(fid, buffer)
	}

	fn file_name(&self, fid: u32) -> String {
		self.archive.read().file_name(fid).to_string()
	}

	fn file_size(&self, fid: u32) -> i32 {
		self.archive.read().file_size(fid)
	}

	fn file_info(&self, fid: u32) -> FileInfo {
		self.archive.read().file_info(fid)
	}

	// the open-time snapshot, not the live index
	fn name_index(&self) -> &AHashMap<String, u32> {
		&self.name_index
	}
}
