use crate::global::flags::Flags;

/// Settings for [`dump`](crate::writer::dump)
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
	/// Flags to be written into the header section of the container.
	pub flags: Flags,
}

// Helper functions
impl BuilderConfig {
	///```
	/// use virtarc::prelude::{Flags, BuilderConfig};
	///
	/// let config = BuilderConfig::default().flags(Flags::new());
	///```
	pub fn flags(mut self, flags: Flags) -> Self {
		self.flags = flags;
		self
	}
}
