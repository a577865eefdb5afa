//! `Nullable<T>` (spec.md §4.5 table): a bool tag followed by `T` when the
//! tag is set. Matches testable property "Nullable value type" exactly:
//! `Some(42)` → `[0x01][42]`, `None` → `[0x00]`.
//!
//! Collection-shaped types are deliberately excluded from this blanket —
//! see [`Nullable`]. They fold null into their own 32-bit header instead
//! (`nino::codecs::collections`, `nino::codecs::wrappers`), matching the
//! collection header contract (spec.md §6) rather than stacking a second
//! tag on top of it.

use crate::error::NinoResult;
use crate::reader::Reader;
use crate::traits::{NinoDecode, NinoEncode};
use crate::writer::Writer;

/// Marker for types with no wire-native null form of their own, so
/// `Option<T>` is free to use a plain bool tag. Every primitive, `String`,
/// tuple, `Polymorphic` and `#[derive(Nino)]` type implements this;
/// `Vec<T>`, `HashMap<K, V>` and the other collection shapes do not.
pub trait Nullable {}

impl<T: NinoEncode + Nullable> NinoEncode for Option<T> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(value) => {
				writer.write_bool(true);
				value.encode(writer);
			}
			None => writer.write_bool(false),
		}
	}
}

impl<T: NinoDecode + Nullable> NinoDecode for Option<T> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		if reader.read_bool()? {
			Ok(Some(T::decode(reader)?))
		} else {
			Ok(None)
		}
	}

	fn decode_into(&mut self, reader: &mut Reader) -> NinoResult<()> {
		if reader.read_bool()? {
			match self {
				Some(existing) => existing.decode_into(reader)?,
				None => *self = Some(T::decode(reader)?),
			}
		} else {
			*self = None;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn some_value_round_trips() {
		let mut w = Writer::new();
		Some(42i32).encode(&mut w);
		let bytes = w.into_bytes();
		assert_eq!(bytes, [1u8, 42, 0, 0, 0]);
		let mut r = Reader::new(&bytes);
		assert_eq!(Option::<i32>::decode(&mut r).unwrap(), Some(42));
	}

	#[test]
	fn none_is_a_single_byte() {
		let mut w = Writer::new();
		None::<i32>.encode(&mut w);
		let bytes = w.into_bytes();
		assert_eq!(bytes, [0u8]);
		let mut r = Reader::new(&bytes);
		assert_eq!(Option::<i32>::decode(&mut r).unwrap(), None);
	}
}
