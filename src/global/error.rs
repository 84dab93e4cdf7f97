use std::{error, io};
use thiserror::Error;

/// `Result` type alias used throughout `virtarc`. Basically equal to: `Result<T, Error>`
pub type Result<T = ()> = std::result::Result<T, Error>;

/// All errors manifestable within `virtarc` collected into a neat enum
#[derive(Debug, Error)]
pub enum Error {
	/// Generic error
	#[error("[VirtArcError::GenericError] {0}")]
	OtherError(Box<dyn error::Error + Send + Sync>),
	/// thin wrapper over [`io::Error`](std::io::Error), captures all IO errors
	#[error("[VirtArcError::IOError] {0}")]
	IOError(#[from] io::Error),
	/// invalid magic sequence in the given source, hinting at corruption or possible incompatibility with the given source
	#[error("[VirtArcError::ValidationError] Invalid magic found in header, possible incompatibility with given source. Magic found {0:?}")]
	MalformedContainerSource([u8; crate::MAGIC_LENGTH]),
	/// current loader attempted to load an incompatible version, contains the incompatible source's version
	#[error("The provided container source has version: {}. While the current implementation speaks version: {}. The provided source is incompatible!", .0, crate::VERSION)]
	IncompatibleContainerVersionError(u16),
	/// the resource was not found
	#[error("[VirtArcError::MissingResourceError] Resource not found: {0}")]
	MissingResourceError(String),
	/// a [`Leaf`](crate::builder::Leaf) has an id that is longer than [`crate::MAX_ID_LENGTH`], contains the overflowing id
	#[error("[VirtArcError::IDSizeOverflowError] The maximum length of any id is: {}. The leaf with id: {} has an overflowing id of length: {}", crate::MAX_ID_LENGTH, .0, .0.len())]
	IDSizeOverflowError(String),
	/// attempted to set a bit in the reserved bit range, [`Flags::RESERVED_MASK`](crate::global::flags::Flags::RESERVED_MASK)
	#[error("[VirtArcError::RestrictedFlagAccessError] Tried to set reserved bit(s)!")]
	RestrictedFlagAccessError,
	/// errors thrown during compression or decompression
	#[error("[VirtArcError::CompressorDecompressorError] {0}")]
	DeCompressionError(#[from] lz4_flex::frame::Error),
}
