//! A struct member whose static type is a base but whose wire value may be
//! any registered subtype (spec.md §4.4.1/§4.4.2 "polymorphic member
//! encode/decode"). [`Polymorphic`] wraps the dispatch-table routing
//! already implemented in `nino::registry` behind ordinary
//! `NinoEncode`/`NinoDecode` impls, so a `#[derive(Nino)]` struct gets the
//! `[TypeId][fields...]` wire form for a member just by declaring its type
//! as `Polymorphic` — no field-level attribute or codegen special-casing
//! needed, since the derive macro already calls through to whatever
//! `NinoEncode`/`NinoDecode` impl a field's declared type has.

use std::any::Any;

use crate::codecs::Nullable;
use crate::error::NinoResult;
use crate::reader::Reader;
use crate::registry;
use crate::traits::{NinoDecode, NinoEncode};
use crate::writer::Writer;

pub struct Polymorphic(Option<Box<dyn Any>>);

impl Polymorphic {
	pub fn new<T: Any>(value: T) -> Self {
		Polymorphic(Some(Box::new(value)))
	}

	pub fn null() -> Self {
		Polymorphic(None)
	}

	pub fn is_null(&self) -> bool {
		self.0.is_none()
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.as_ref()?.downcast_ref()
	}

	pub fn into_inner(self) -> Option<Box<dyn Any>> {
		self.0
	}
}

/// `Polymorphic` is nullable through the dispatch table's own
/// `NULL_TYPE_ID` sentinel, the same way a collection is nullable through
/// its own header — not through an extra bool tag.
impl Nullable for Polymorphic {}

impl NinoEncode for Polymorphic {
	fn encode(&self, writer: &mut Writer) {
		match &self.0 {
			Some(value) => registry::encode_polymorphic(value.as_ref(), writer),
			None => writer.write_type_id(nino_core::type_id::NULL_TYPE_ID),
		}
	}
}

impl NinoDecode for Polymorphic {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		Ok(Polymorphic(registry::decode_polymorphic(reader)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn null_polymorphic_round_trips_through_the_null_type_id() {
		let value = Polymorphic::null();
		let mut w = Writer::new();
		value.encode(&mut w);
		let bytes = w.into_bytes();
		assert_eq!(bytes, 0u32.to_ne_bytes());

		let mut r = Reader::new(&bytes);
		let decoded = Polymorphic::decode(&mut r).unwrap();
		assert!(decoded.is_null());
	}
}
