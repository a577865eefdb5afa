//! `Tuple`/`ValueTuple` (spec.md §4.5): elements written in order. The
//! emitted user-type serializer performs the real all-unmanaged-members
//! bulk optimization (spec.md §4.4.1); these generic impls always take
//! the always-correct element-wise path, since stable Rust has no way to
//! specialize a blanket tuple impl on "every element happens to be
//! `Unmanaged`" without nightly specialization.

use crate::codecs::Nullable;
use crate::error::NinoResult;
use crate::reader::Reader;
use crate::traits::{NinoDecode, NinoEncode};
use crate::writer::Writer;

macro_rules! impl_tuple {
	($($idx:tt : $name:ident),+) => {
		impl<$($name),+> Nullable for ($($name,)+) {}

		impl<$($name: NinoEncode),+> NinoEncode for ($($name,)+) {
			fn encode(&self, writer: &mut Writer) {
				$(self.$idx.encode(writer);)+
			}
		}

		impl<$($name: NinoDecode),+> NinoDecode for ($($name,)+) {
			fn decode(reader: &mut Reader) -> NinoResult<Self> {
				Ok(($($name::decode(reader)?,)+))
			}
		}
	};
}

impl_tuple!(0: A);
impl_tuple!(0: A, 1: B);
impl_tuple!(0: A, 1: B, 2: C);
impl_tuple!(0: A, 1: B, 2: C, 3: D);
impl_tuple!(0: A, 1: B, 2: C, 3: D, 4: E);
impl_tuple!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F);
impl_tuple!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G);
impl_tuple!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pair_round_trips_in_order() {
		let mut w = Writer::new();
		(1i32, true).encode(&mut w);
		let bytes = w.into_bytes();
		let mut r = Reader::new(&bytes);
		assert_eq!(<(i32, bool)>::decode(&mut r).unwrap(), (1, true));
	}

	#[test]
	fn larger_tuple_round_trips() {
		let value = (1u8, 2u16, 3u32, 4u64, true, "x".to_string(), 7i8);
		let mut w = Writer::new();
		value.encode(&mut w);
		let bytes = w.into_bytes();
		let mut r = Reader::new(&bytes);
		let decoded = <(u8, u16, u32, u64, bool, String, i8)>::decode(&mut r).unwrap();
		assert_eq!(value, decoded);
	}
}
