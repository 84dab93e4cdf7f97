#![deny(missing_docs)]

/*!
An in-memory virtual archive layer for game asset filesystems.

A [`VirtualArchive`](vfs::VirtualArchive) mimics a real archive file: runtime-generated
content (synthesized maps, recorded replays) is appended as named byte buffers and read
back through the same archive-reader interface as any on-disk archive, without ever
touching the disk. When persistence is wanted, the archive is exported
non-destructively into a compact compressed container which the [`Archive`](archive::Archive)
loader reads back.

### 🀄 Show me some code _dang it!_

```
use virtarc::vfs::{ArchiveReader, VirtualArchiveRegistry};

// the embedder owns the registry and hands it to its filesystem mount logic
let mut registry = VirtualArchiveRegistry::new();

// some generator subsystem fills a virtual archive with synthesized content
let archive = registry.create_archive("synth_maps");
{
	let mut archive = archive.write();
	let fid = archive.add_file("maps/crater.lua");
	archive.file_mut(fid).unwrap().buffer.extend_from_slice(b"return { size = 128 }");
}

// the filesystem layer later opens it like any other archive
let handle = registry.open_by_file_name("synth_maps.virt").unwrap();
let fid = handle.find_file("MAPS/CRATER.lua").unwrap();

let mut buffer = Vec::new();
assert!(handle.get_file(fid, &mut buffer));
assert_eq!(buffer, b"return { size = 128 }");
```
*/

/// All tests are included in this module.
mod tests;

pub(crate) mod global;
pub(crate) mod loader;
pub(crate) mod writer;

/// The virtual archive subsystem: [`VirtualArchive`](vfs::VirtualArchive), its
/// [registry](vfs::VirtualArchiveRegistry) and the generic archive-reader contract.
pub mod vfs;

/// Current container format version, increments with every wire format change
pub const VERSION: u16 = 10;

/// Maximum length for any entry id, ie `u16::MAX`
pub const MAX_ID_LENGTH: usize = u16::MAX as usize;

/// Magic sequence identifying a persisted container: "VtARC"
pub const MAGIC: [u8; crate::MAGIC_LENGTH] = *b"VtARC";
pub(crate) const MAGIC_LENGTH: usize = 5;

/// Reserved extension tag under which virtual archives are resolvable by a
/// filesystem layer's archive-type dispatch, eg `synth_maps.virt`
pub const VIRTUAL_EXTENSION: &str = "virt";

/// Extension given to persisted containers written by
/// [`VirtualArchive::persist`](vfs::VirtualArchive::persist)
pub const CONTAINER_EXTENSION: &str = "varc";

/// Consolidated crate imports.
pub mod prelude {
	pub use crate::global::{error::*, flags::Flags, reg_entry::RegistryEntry};
	pub use crate::archive::*;
	pub use crate::builder::*;
	pub use crate::vfs::*;
}

/// Container creation logic and data structures, [`dump`](crate::builder::dump),
/// [`Leaf`](crate::builder::Leaf) and [`BuilderConfig`](crate::builder::BuilderConfig)
pub mod builder {
	pub use crate::writer::*;
	pub use crate::global::{error::*, flags::Flags};
	pub use crate::global::compressor::CompressionAlgorithm;
}

/// Container reading logic and data structures, [`Archive`](crate::archive::Archive) and
/// [`Resource`](crate::archive::Resource)
pub mod archive {
	pub use crate::loader::{archive::Archive, resource::Resource};
	pub use crate::global::{reg_entry::RegistryEntry, error::*, flags::Flags};
	pub use crate::global::compressor::CompressionAlgorithm;
}
