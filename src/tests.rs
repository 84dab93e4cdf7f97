#![cfg(test)]
// This is meant to mirror as closely as possible, how users should drive the crate

// Boring, average every day contemporary imports
use std::{io::Cursor, path::Path};
use crate::prelude::*;

// Custom bitflag tests
const CUSTOM_FLAG_1: u32 = 0b0000_0000_0000_0000_0000_1000_0000_0000;
const CUSTOM_FLAG_2: u32 = 0b0000_0000_0000_0000_0000_0100_0000_0000;
const CUSTOM_FLAG_3: u32 = 0b0000_0000_0000_0000_0000_0000_1000_0000;
const CUSTOM_FLAG_4: u32 = 0b0000_0000_0000_0000_0000_0000_0001_0000;

#[test]
fn flag_restricted_access() {
	let mut flag = Flags::from_bits(0b1111_1000_0000_0000);

	// This should return an error
	if let Err(error) = flag.set(Flags::COMPRESSED_FLAG, true) {
		assert!(matches!(error, Error::RestrictedFlagAccessError));
	} else {
		panic!("Access to restricted flags has been allowed, this should not be feasible")
	};
}

#[test]
fn flags_set_intersects() {
	let mut flag = Flags::new();

	flag.force_set(Flags::COMPRESSED_FLAG, true);
	assert_eq!(flag.bits(), Flags::COMPRESSED_FLAG);

	flag.force_set(Flags::COMPRESSED_FLAG, true);
	assert_eq!(flag.bits(), Flags::COMPRESSED_FLAG);

	flag.force_set(Flags::LZ4_COMPRESSED, true);
	assert_eq!(flag.bits(), Flags::COMPRESSED_FLAG | Flags::LZ4_COMPRESSED);

	flag.force_set(Flags::COMPRESSED_FLAG, false);
	assert_eq!(flag.bits(), Flags::LZ4_COMPRESSED);

	flag.force_set(Flags::COMPRESSED_FLAG, false);
	assert_eq!(flag.bits(), Flags::LZ4_COMPRESSED);

	flag.force_set(Flags::COMPRESSED_FLAG | Flags::LZ4_COMPRESSED, true);
	assert_eq!(flag.bits(), Flags::COMPRESSED_FLAG | Flags::LZ4_COMPRESSED);
}

#[test]
fn custom_bitflags() -> Result {
	let mut flags = Flags::default();
	flags.set(CUSTOM_FLAG_1 | CUSTOM_FLAG_2 | CUSTOM_FLAG_3 | CUSTOM_FLAG_4, true)?;

	let mut target = Cursor::new(Vec::new());
	let mut leaves = [Leaf::new(b"pong".as_slice(), "ping").flags(flags)];
	dump(&mut target, &mut leaves, &BuilderConfig::default(), None)?;

	let archive = Archive::new(target)?;
	let entry = archive.fetch_entry("ping").unwrap();

	assert!(entry
		.flags
		.contains(CUSTOM_FLAG_1 | CUSTOM_FLAG_2 | CUSTOM_FLAG_3 | CUSTOM_FLAG_4));

	Ok(())
}

#[test]
fn builder_then_fetch() -> Result {
	let song = b"Around The World, Fatter wetter stronker".as_slice();
	let wall = [12u8; 4096];

	let mut leaves = [
		Leaf::new(song, "song"),
		Leaf::new(b"Hello, Cassandra!".as_slice(), "greeting").compress(CompressMode::Never),
		Leaf::new(wall.as_slice(), "wall").compress(CompressMode::Always).version(10),
		Leaf::new(song, "detect").compress(CompressMode::Detect),
	];

	let mut processed = 0u32;
	let mut callback = |_entry: &RegistryEntry, _data: &[u8]| processed += 1;

	let mut target = Cursor::new(Vec::new());
	let written = dump(&mut target, &mut leaves, &BuilderConfig::default(), Some(&mut callback))?;

	assert_eq!(processed, 4);
	assert_eq!(written, target.get_ref().len() as u64);

	let mut archive = Archive::new(target)?;

	let resource = archive.fetch_mut("song")?;
	assert_eq!(resource.data.as_ref(), song);
	assert!(!resource.flags.contains(Flags::COMPRESSED_FLAG));

	let hello = archive.fetch("greeting")?;
	assert_eq!("Hello, Cassandra!", std::str::from_utf8(&hello.data).unwrap());

	let wall_resource = archive.fetch("wall")?;
	assert_eq!(wall_resource.data.as_ref(), wall.as_slice());
	assert!(wall_resource.flags.contains(Flags::COMPRESSED_FLAG));
	assert_eq!(wall_resource.content_version, 10);

	// a wall of the same byte compresses well, so Detect picked the compressed form
	assert!(archive.fetch_entry("wall").unwrap().offset < wall.len() as u64);

	match archive.fetch("absent") {
		Err(Error::MissingResourceError(id)) => assert_eq!(id, "absent"),
		_ => panic!("fetching an absent id must report MissingResourceError"),
	};

	Ok(())
}

#[test]
fn test_compressors() -> Result {
	const INPUT_LEN: usize = 4096;

	let input = [12u8; INPUT_LEN];
	let mut target = Cursor::new(vec![]);

	let mut leaves = [
		Leaf::new(input.as_slice(), "LZ4")
			.compression_algo(CompressionAlgorithm::LZ4)
			.compress(CompressMode::Always),
		Leaf::new(input.as_slice(), "BROTLI")
			.compression_algo(CompressionAlgorithm::Brotli(9))
			.compress(CompressMode::Always),
		Leaf::new(input.as_slice(), "SNAPPY")
			.compression_algo(CompressionAlgorithm::Snappy)
			.compress(CompressMode::Always),
	];

	let builder_config = BuilderConfig::default();
	dump(&mut target, &mut leaves, &builder_config, None)?;

	let mut archive = Archive::new(&mut target)?;

	let d1 = archive.fetch_mut("LZ4")?;
	let d2 = archive.fetch_mut("BROTLI")?;
	let d3 = archive.fetch_mut("SNAPPY")?;

	// Identity tests
	assert_eq!(d1.data.len(), INPUT_LEN);
	assert_eq!(d2.data.len(), INPUT_LEN);
	assert_eq!(d3.data.len(), INPUT_LEN);

	assert!(&d1.data[..] == &input);
	assert!(&d2.data[..] == &input);
	assert!(&d3.data[..] == &input);

	// Compression tests
	assert!(archive.fetch_entry("LZ4").unwrap().offset < INPUT_LEN as u64);
	assert!(archive.fetch_entry("BROTLI").unwrap().offset < INPUT_LEN as u64);
	assert!(archive.fetch_entry("SNAPPY").unwrap().offset < INPUT_LEN as u64);

	Ok(())
}

#[test]
fn duplicate_ids_round_trip() -> Result {
	let mut target = Cursor::new(Vec::new());
	let mut leaves = [
		Leaf::new(b"old".as_slice(), "twin"),
		Leaf::new(b"new".as_slice(), "twin"),
	];

	dump(&mut target, &mut leaves, &BuilderConfig::default(), None)?;

	let archive = Archive::new(target)?;
	assert_eq!(archive.entries().len(), 2);

	// id fetches resolve to the later entry, both stay reachable by position
	assert_eq!(archive.fetch("twin")?.data.as_ref(), b"new".as_slice());
	assert_eq!(archive.fetch_at(0)?.data.as_ref(), b"old".as_slice());
	assert_eq!(archive.fetch_at(1)?.data.as_ref(), b"new".as_slice());

	Ok(())
}

#[test]
fn virtual_archive_indices() {
	let mut archive = VirtualArchive::new("indices");
	let names = ["a.txt", "b.txt", "c.txt", "b.txt"];

	for (position, name) in names.iter().enumerate() {
		assert_eq!(archive.add_file(name), position as u32);
	}

	assert_eq!(archive.num_files(), names.len() as u32);

	// every entry keeps the exact name it was added under, duplicates included
	for (position, name) in names.iter().enumerate() {
		assert_eq!(archive.file_name(position as u32), *name);
	}

	assert_eq!(archive.file(2).unwrap().index(), 2);
	assert_eq!(archive.file(2).unwrap().name(), "c.txt");
	assert!(archive.file(99).is_none());
}

#[test]
fn duplicate_names_shadow_in_name_index() {
	let mut archive = VirtualArchive::new("dupes");

	let first = archive.add_file("unit.fbi");
	let second = archive.add_file("unit.fbi");
	assert_eq!((first, second), (0, 1));

	archive.file_mut(first).unwrap().buffer.extend_from_slice(b"old");
	archive.file_mut(second).unwrap().buffer.extend_from_slice(b"new");

	// the later entry wins name lookups
	assert_eq!(archive.resolve("unit.fbi"), Some(second));
	assert_eq!(archive.resolve("UNIT.FBI"), Some(second));

	// while both entries stay addressable by index
	let mut buffer = Vec::new();
	assert!(archive.get_file(first, &mut buffer));
	assert_eq!(buffer, b"old".as_slice());
	assert!(archive.get_file(second, &mut buffer));
	assert_eq!(buffer, b"new".as_slice());
}

#[test]
fn get_file_out_of_range() {
	let mut archive = VirtualArchive::new("oob");

	let fid = archive.add_file("present");
	archive.file_mut(fid).unwrap().buffer.push(1);

	// a failed read leaves the output buffer untouched
	let mut buffer = vec![0xAA; 3];
	assert!(!archive.get_file(1, &mut buffer));
	assert_eq!(buffer, [0xAA; 3]);

	assert!(archive.get_file(0, &mut buffer));
	assert_eq!(buffer, [1]);
}

#[test]
fn file_size_tracks_buffer() {
	let mut archive = VirtualArchive::new("sizes");
	let fid = archive.add_file("radar.blip");

	assert_eq!(archive.file_size(fid), 0);

	archive.file_mut(fid).unwrap().buffer.extend_from_slice(&[0; 48]);
	assert_eq!(archive.file_size(fid), 48);

	archive.file_mut(fid).unwrap().buffer.truncate(16);
	assert_eq!(archive.file_size(fid), 16);

	let info = archive.file_info(fid);
	assert_eq!(info.name, "radar.blip");
	assert_eq!(info.size, 16);
	assert_eq!(info.mod_time, 0);
	assert!(info.special_name.is_empty());
}

#[test]
fn registry_miss_is_not_an_error() {
	let mut registry = VirtualArchiveRegistry::new();
	registry.create_archive("present");

	assert_eq!(registry.len(), 1);
	assert!(!registry.is_empty());

	assert!(registry.open_by_file_name("absent.virt").is_none());
	assert!(registry.get("absent").is_none());

	// archive names match case-sensitively, unlike entry names
	assert!(registry.open_by_file_name("PRESENT.virt").is_none());

	// directory decoration is stripped before matching
	assert!(registry.open_by_file_name("maps/present.virt").is_some());
	assert!(registry.open_by_file_name("present").is_some());
}

#[test]
fn handle_snapshot_semantics() {
	let mut registry = VirtualArchiveRegistry::new();
	let archive = registry.create_archive("snapshot");

	{
		let mut archive = archive.write();
		let fid = archive.add_file("first.lua");
		archive.file_mut(fid).unwrap().buffer.extend_from_slice(b"one");
	}

	let stale = registry.open_by_file_name("snapshot.virt").unwrap();

	// append between opens, through the registry this time
	registry.get("snapshot").unwrap().write().add_file("second.lua");

	let fresh = registry.open_by_file_name("snapshot.virt").unwrap();

	// name lookups resolve against the open-time snapshot...
	assert_eq!(stale.name_index().len(), 1);
	assert!(stale.find_file("second.lua").is_none());
	assert_eq!(fresh.name_index().len(), 2);
	assert!(fresh.find_file("SECOND.LUA").is_some());

	// ...while forwarded calls always see the live archive
	assert_eq!(stale.num_files(), 2);
	assert_eq!(fresh.num_files(), 2);

	let mut buffer = Vec::new();
	let fid = stale.find_file("first.lua").unwrap();
	assert!(stale.get_file(fid, &mut buffer));
	assert_eq!(buffer, b"one".as_slice());
}

#[test]
fn factory_dispatch() {
	let mut registry = VirtualArchiveRegistry::new();
	let archive = registry.create_archive("factory");

	{
		let mut archive = archive.write();
		let fid = archive.add_file("Stats/Win.json");
		archive.file_mut(fid).unwrap().buffer.extend_from_slice(b"{}");
	}

	let factory: &dyn ArchiveFactory = &registry;
	assert_eq!(factory.extension(), crate::VIRTUAL_EXTENSION);

	let reader = factory.open_archive("factory.virt").unwrap();
	let fid = reader.find_file("stats/win.JSON").unwrap();

	assert_eq!(reader.file_name(fid), "Stats/Win.json");
	assert_eq!(reader.file_size(fid), 2);
	assert_eq!(reader.file_info(fid).size, 2);

	let mut buffer = Vec::new();
	assert!(reader.get_file(fid, &mut buffer));
	assert_eq!(buffer, b"{}".as_slice());

	assert!(factory.open_archive("other.virt").is_none());
}

#[test]
fn persist_round_trip() -> Result {
	let _ = env_logger::builder().is_test(true).try_init();

	let directory = tempfile::tempdir()?;
	let mut archive = VirtualArchive::new("generated");

	let a = archive.add_file("a.txt");
	archive.file_mut(a).unwrap().buffer.extend_from_slice(b"hello");

	let bytes = (0..=255u8).collect::<Vec<_>>();
	let b = archive.add_file("b.bin");
	archive.file_mut(b).unwrap().buffer.extend_from_slice(&bytes);

	assert!(archive.persist(directory.path()));

	let path = directory.path().join("generated.varc");
	let container = Archive::new(std::fs::File::open(&path)?)?;

	// entries come back in insertion order
	let names = container
		.entries()
		.iter()
		.map(|entry| entry.id.as_ref())
		.collect::<Vec<_>>();
	assert_eq!(names, ["a.txt", "b.bin"]);

	assert_eq!(container.fetch("a.txt")?.data.as_ref(), b"hello".as_slice());
	assert_eq!(container.fetch("b.bin")?.data.as_ref(), bytes.as_slice());

	// export is non-destructive and repeatable
	assert!(archive.persist(directory.path()));
	assert_eq!(archive.num_files(), 2);

	Ok(())
}

#[test]
fn persist_failure_leaves_archive_usable() {
	let _ = env_logger::builder().is_test(true).try_init();

	let mut archive = VirtualArchive::new("unwritable");
	let fid = archive.add_file("data.bin");
	archive.file_mut(fid).unwrap().buffer.push(7);

	assert!(!archive.persist(Path::new("/definitely/not/a/real/directory")));

	// the failed export never touches in-memory state
	assert_eq!(archive.num_files(), 1);
	let mut buffer = Vec::new();
	assert!(archive.get_file(fid, &mut buffer));
	assert_eq!(buffer, [7]);
}
