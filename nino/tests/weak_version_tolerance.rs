#![cfg(feature = "weak-version-tolerance")]

use nino::{Nino, NinoDecode, NinoEncode, Reader, Writer};

/// Two differently-shaped versions of the same logical type, each put
/// through the real `#[derive(Nino)]` expansion: a writer built against
/// one shape and a reader built against the other round-trip through the
/// per-member frame envelope the `weak-version-tolerance` feature wires
/// into `encode`/`decode` (spec.md §4.4.1/§4.4.2, §7, §8).
mod v1 {
	use super::Nino;

	#[derive(Debug, Nino)]
	pub struct Player {
		pub id: u32,
		pub hp: u32,
	}
}

mod v2 {
	use super::Nino;

	#[derive(Debug, Nino)]
	pub struct Player {
		pub id: u32,
		pub hp: u32,
		pub shield: u32,
	}
}

#[test]
fn older_reader_skips_a_field_written_by_a_newer_writer() {
	let newer = v2::Player { id: 7, hp: 100, shield: 50 };
	let mut writer = Writer::new();
	newer.encode(&mut writer);
	let bytes = writer.into_bytes();

	let mut reader = Reader::new(&bytes);
	let older = v1::Player::decode(&mut reader).unwrap();
	assert_eq!(older.id, 7);
	assert_eq!(older.hp, 100);
	assert!(reader.eof());
}

#[test]
fn newer_reader_defaults_a_field_missing_from_an_older_payload() {
	let older = v1::Player { id: 3, hp: 40 };
	let mut writer = Writer::new();
	older.encode(&mut writer);
	let bytes = writer.into_bytes();

	let mut reader = Reader::new(&bytes);
	let newer = v2::Player::decode(&mut reader).unwrap();
	assert_eq!(newer.id, 3);
	assert_eq!(newer.hp, 40);
	assert_eq!(newer.shield, 0);
}

#[test]
fn frame_length_is_exactly_the_payload_written_inside_it() {
	let mut writer = Writer::new();
	let handle = writer.reserve_frame();
	42u32.encode(&mut writer);
	writer.back_patch_frame(handle);
	let bytes = writer.into_bytes();

	let mut reader = Reader::new(&bytes);
	assert_eq!(reader.read_frame_len().unwrap(), 4);
	assert_eq!(u32::decode(&mut reader).unwrap(), 42);
	assert!(reader.eof());
}
