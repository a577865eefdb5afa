//! The two procedures every emitted type gets (spec.md §4.4): `encode`
//! mirrors `Serialize(value, writer)`, `decode`/`decode_into` mirror
//! `Deserialize(out value, reader)` and its `ref` overload.

use crate::codecs::Nullable;
use crate::error::NinoResult;
use crate::reader::Reader;
use crate::writer::Writer;

pub trait NinoEncode {
	fn encode(&self, writer: &mut Writer);

	/// Encodes a contiguous run of `Self`, element by element by default.
	/// [`Unmanaged`] leaves override this to issue one bulk copy instead
	/// (spec.md §4.5 "Fast-path rule") — the collection codecs in
	/// `nino::codecs` always call this rather than looping themselves, so
	/// the fast path is picked up automatically by monomorphization with
	/// no specialization needed.
	#[inline]
	fn encode_slice(items: &[Self], writer: &mut Writer)
	where
		Self: Sized,
	{
		for item in items {
			item.encode(writer);
		}
	}
}

pub trait NinoDecode: Sized {
	fn decode(reader: &mut Reader) -> NinoResult<Self>;

	/// The `ref`-overload: mutate into an existing instance rather than
	/// constructing a fresh one. Container types override this to clear
	/// and refill in place; the default just calls [`NinoDecode::decode`]
	/// and overwrites, which is always correct, only not always the
	/// cheapest option (spec.md §4.4.2 "Mutation semantics").
	fn decode_into(&mut self, reader: &mut Reader) -> NinoResult<()> {
		*self = Self::decode(reader)?;
		Ok(())
	}

	/// Read-side counterpart of [`NinoEncode::encode_slice`].
	fn decode_vec(reader: &mut Reader, len: usize) -> NinoResult<Vec<Self>> {
		let mut out = Vec::with_capacity(len);
		for _ in 0..len {
			out.push(Self::decode(reader)?);
		}
		Ok(out)
	}
}

/// Marker for types whose [`NinoEncode`]/[`NinoDecode`] impl is a raw,
/// padding-free, host-endian memory copy — the fast-path eligibility test
/// C4/C5 use to decide whether a run of members (or a whole collection's
/// elements) can be written/read with one bulk copy instead of one call
/// per element (spec.md §4.4.1, §4.5 "Fast-path rule").
///
/// # Safety
/// Implementors must have no padding bytes that participate in equality
/// or hashing, and must be valid for any bit pattern representable by
/// their size (so a bulk-copied buffer can always be reinterpreted back).
pub unsafe trait Unmanaged: Copy {}

macro_rules! impl_unmanaged_and_codec {
	($($ty:ty),* $(,)?) => {$(
		unsafe impl Unmanaged for $ty {}

		impl Nullable for $ty {}

		impl NinoEncode for $ty {
			#[inline]
			fn encode(&self, writer: &mut Writer) {
				writer.write_unmanaged(self);
			}

			#[inline]
			fn encode_slice(items: &[Self], writer: &mut Writer) {
				writer.write_unmanaged_bulk(items);
			}
		}

		impl NinoDecode for $ty {
			#[inline]
			fn decode(reader: &mut Reader) -> NinoResult<Self> {
				reader.read_unmanaged()
			}

			#[inline]
			fn decode_vec(reader: &mut Reader, len: usize) -> NinoResult<Vec<Self>> {
				reader.read_unmanaged_bulk(len)
			}
		}
	)*};
}

impl_unmanaged_and_codec!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64, usize, isize);

impl Nullable for bool {}

impl NinoEncode for bool {
	#[inline]
	fn encode(&self, writer: &mut Writer) {
		writer.write_bool(*self);
	}
}

impl NinoDecode for bool {
	#[inline]
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		reader.read_bool()
	}
}

impl Nullable for char {}

impl NinoEncode for char {
	#[inline]
	fn encode(&self, writer: &mut Writer) {
		writer.write_unmanaged(&(*self as u32));
	}
}

impl NinoDecode for char {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let raw: u32 = reader.read_unmanaged()?;
		char::from_u32(raw)
			.ok_or_else(|| crate::error::NinoError::InvalidPayload("invalid char scalar value".into()))
	}
}

impl Nullable for () {}

impl NinoEncode for () {
	#[inline]
	fn encode(&self, _writer: &mut Writer) {}
}

impl NinoDecode for () {
	#[inline]
	fn decode(_reader: &mut Reader) -> NinoResult<Self> {
		Ok(())
	}
}

/// Default string mode: length-prefixed UTF-16, matching the runtime
/// writer's built-in path (spec.md §6). Member-level UTF-8 opt-in bypasses
/// this impl entirely — emitted code calls `Writer::write_utf8_string`/
/// `Reader::read_utf8_string` directly for members annotated
/// `#[nino(utf8)]`, since the wire mode is a per-member choice, not a
/// per-type one.
impl Nullable for String {}

impl NinoEncode for String {
	fn encode(&self, writer: &mut Writer) {
		writer.write_utf16_string(self);
	}
}

impl NinoDecode for String {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		reader.read_utf16_string()
	}
}

impl NinoEncode for str {
	fn encode(&self, writer: &mut Writer) {
		writer.write_utf16_string(self);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn round_trip<T: NinoEncode + NinoDecode + PartialEq + std::fmt::Debug>(value: T) {
		let mut writer = Writer::new();
		value.encode(&mut writer);
		let bytes = writer.into_bytes();
		let mut reader = Reader::new(&bytes);
		let decoded = T::decode(&mut reader).unwrap();
		assert_eq!(value, decoded);
	}

	#[test]
	fn primitives_round_trip() {
		round_trip(42u32);
		round_trip(-7i64);
		round_trip(3.5f64);
		round_trip(true);
		round_trip(false);
		round_trip('λ');
		round_trip(());
	}

	#[test]
	fn strings_round_trip_utf16_by_default() {
		round_trip("hello wörld".to_string());
	}
}
