use std::{path::Path, sync::Arc};

use parking_lot::RwLock;

use super::archive::{VirtualArchive, VirtualArchiveHandle};
use super::contract::{ArchiveFactory, ArchiveReader};
use super::SharedVirtualArchive;

/// Owns every [`VirtualArchive`] in the process and opens read sessions over
/// them on behalf of a filesystem layer.
///
/// There is deliberately no global instance: the embedder constructs one
/// registry and plugs it into its filesystem's archive-type dispatch as the
/// factory for the [`virt`](crate::VIRTUAL_EXTENSION) extension, while content
/// generators hold shared views onto individual archives.
#[derive(Debug, Default)]
pub struct VirtualArchiveRegistry {
	archives: Vec<SharedVirtualArchive>,
}

impl VirtualArchiveRegistry {
	/// Creates an empty registry.
	pub fn new() -> VirtualArchiveRegistry {
		VirtualArchiveRegistry { archives: Vec::new() }
	}

	/// Allocates a new empty [`VirtualArchive`] under the given logical name and
	/// returns a shared view for the caller to populate. The registry keeps
	/// ownership for its own lifetime.
	pub fn create_archive<S: AsRef<str>>(&mut self, logical_name: S) -> SharedVirtualArchive {
		log::trace!("registering virtual archive \"{}\"", logical_name.as_ref());

		let archive = Arc::new(RwLock::new(VirtualArchive::new(logical_name)));
		self.archives.push(Arc::clone(&archive));

		archive
	}

	/// Looks up an archive by its exact logical name. First match wins should
	/// duplicates exist.
	pub fn get(&self, logical_name: &str) -> Option<SharedVirtualArchive> {
		self.archives
			.iter()
			.find(|archive| archive.read().name() == logical_name)
			.map(Arc::clone)
	}

	/// Opens a read session over the archive whose logical name matches the base
	/// name of `file_name` (directory and extension stripped, case-sensitive).
	///
	/// A `None` is the designed miss path: the filesystem layer probes virtual
	/// archives first and falls through to on-disk resolution. Misses are
	/// therefore not errors and are only ever logged at trace level.
	pub fn open_by_file_name(&self, file_name: &str) -> Option<VirtualArchiveHandle> {
		let base_name = Path::new(file_name).file_stem()?.to_str()?;

		for archive in &self.archives {
			if archive.read().name() == base_name {
				return Some(VirtualArchiveHandle::open(archive));
			}
		}

		log::trace!("no virtual archive registered under \"{}\"", file_name);
		None
	}

	/// Number of registered archives.
	#[inline(always)]
	pub fn len(&self) -> usize {
		self.archives.len()
	}

	/// Whether no archives have been registered yet.
	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.archives.is_empty()
	}
}

impl ArchiveFactory for VirtualArchiveRegistry {
	fn extension(&self) -> &'static str {
		crate::VIRTUAL_EXTENSION
	}

	fn open_archive(&self, file_name: &str) -> Option<Box<dyn ArchiveReader>> {
		self.open_by_file_name(file_name)
			.map(|handle| Box::new(handle) as Box<dyn ArchiveReader>)
	}
}
