use std::fmt;
use crate::global::flags::Flags;

/// Processed data obtained from a container, decompressed where the entry called for it.
/// Is returned by [`fetch`](crate::archive::Archive::fetch) and friends
#[derive(Debug, Default)]
pub struct Resource {
	/// The decompressed data
	pub data: Box<[u8]>,
	/// The flags extracted from the container entry
	pub flags: Flags,
	/// The content version of the extracted container entry
	pub content_version: u8,
}

impl fmt::Display for Resource {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"[Resource] size: {size} bytes, content version: {version}, flags: {flags}",
			size = self.data.len(),
			flags = &self.flags,
			version = &self.content_version
		)
	}
}
