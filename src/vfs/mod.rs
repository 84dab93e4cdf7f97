use std::sync::Arc;
use parking_lot::RwLock;

mod archive;
mod contract;
mod registry;

pub use archive::{VirtualArchive, VirtualArchiveHandle, VirtualFile};
pub use contract::{ArchiveFactory, ArchiveReader, FileInfo};
pub use registry::VirtualArchiveRegistry;

/// Shared view over a registry-owned [`VirtualArchive`]: the registry keeps one
/// strong reference for its own lifetime, content generators hold another while
/// they populate the archive. Reads take the lock shared, appends take it
/// exclusively.
pub type SharedVirtualArchive = Arc<RwLock<VirtualArchive>>;
