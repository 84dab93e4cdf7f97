use ahash::AHashMap;

/// Metadata for a single file inside an archive, as reported to the filesystem layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
	/// Archive-relative path of the file
	pub name: String,
	/// Alternate name some archive backends expose, empty for virtual entries
	pub special_name: String,
	/// Uncompressed size in bytes
	pub size: i32,
	/// Unix modification time, `0` for virtual entries
	pub mod_time: u64,
}

/// The minimal operation set any archive backend must implement to be mountable
/// by a virtual-filesystem layer.
///
/// File ids range over `[0, num_files())`; callers are expected to only pass ids
/// obtained from enumeration. Passing an out-of-range id to anything but
/// [`get_file`](ArchiveReader::get_file) is a programming error and panics.
pub trait ArchiveReader {
	/// Number of files in this archive.
	fn num_files(&self) -> u32;

	/// Copies the contents of the file `fid` into `buffer`, replacing its contents.
	/// Returns `false` and leaves `buffer` untouched when `fid` is out of range.
	fn get_file(&self, fid: u32, buffer: &mut Vec<u8>) -> bool;

	/// Archive-relative path of the file `fid`.
	fn file_name(&self, fid: u32) -> String;

	/// Uncompressed size of the file `fid`, in bytes.
	fn file_size(&self, fid: u32) -> i32;

	/// Full [`FileInfo`] for the file `fid`.
	fn file_info(&self, fid: u32) -> FileInfo;

	/// The backend's name index: case-folded name → file id. Backends that hand
	/// out read sessions may return a snapshot rather than a live index.
	fn name_index(&self) -> &AHashMap<String, u32>;

	/// Resolves a name to a file id through [`name_index`](ArchiveReader::name_index),
	/// case-insensitively.
	fn find_file(&self, name: &str) -> Option<u32> {
		self.name_index().get(&name.to_lowercase()).copied()
	}
}

/// Produces [`ArchiveReader`]s for one archive flavor, keyed by file extension.
///
/// A filesystem layer's archive-type dispatch keeps one factory per known
/// extension and probes them in turn; a `None` from
/// [`open_archive`](ArchiveFactory::open_archive) is the designed miss path,
/// never an error.
pub trait ArchiveFactory {
	/// The file extension this factory recognizes.
	fn extension(&self) -> &'static str;

	/// Opens an archive by filename, or `None` when this factory holds nothing
	/// under that name.
	fn open_archive(&self, file_name: &str) -> Option<Box<dyn ArchiveReader>>;
}
