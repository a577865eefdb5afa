use std::any::Any;

use nino::registry::{decode_polymorphic, encode_polymorphic};
use nino::{Nino, NinoDecode, NinoEncode, Polymorphic, Reader, TypeId, Writer};

#[derive(Debug, Clone, PartialEq, Nino)]
#[nino(polymorphic)]
struct Dog {
	name: String,
}

#[derive(Debug, Clone, PartialEq, Nino)]
#[nino(polymorphic)]
struct Cat {
	name: String,
	lives: u8,
}

#[test]
fn dispatches_to_the_concrete_type_that_wrote_the_payload() {
	let dog: Box<dyn Any> = Box::new(Dog { name: "Rex".to_string() });
	let mut writer = Writer::new();
	encode_polymorphic(dog.as_ref(), &mut writer);
	let bytes = writer.into_bytes();

	let mut reader = Reader::new(&bytes);
	let decoded = decode_polymorphic(&mut reader).unwrap().unwrap();
	assert_eq!(decoded.downcast_ref::<Dog>().unwrap().name, "Rex");
}

#[test]
fn distinct_registered_types_get_distinct_wire_tags() {
	let cat: Box<dyn Any> = Box::new(Cat { name: "Momo".to_string(), lives: 9 });
	let mut writer = Writer::new();
	encode_polymorphic(cat.as_ref(), &mut writer);
	let bytes = writer.into_bytes();

	let mut reader = Reader::new(&bytes);
	let decoded = decode_polymorphic(&mut reader).unwrap().unwrap();
	let cat = decoded.downcast_ref::<Cat>().unwrap();
	assert_eq!(cat.name, "Momo");
	assert_eq!(cat.lives, 9);
}

/// Base `A` ⇐ `B` ⇐ `C`: a struct member declared as the base's `Polymorphic`
/// wrapper routes through the dispatch registry, so encoding a `C` at that
/// member produces `[TypeId(C)][a][b][c]` and decoding it back yields a
/// `C`, recovered through the base-typed member (spec.md §8 scenario 1).
#[derive(Debug, Clone, PartialEq, Nino)]
#[nino(polymorphic)]
struct A {
	a: i32,
}

#[derive(Debug, Clone, PartialEq, Nino)]
#[nino(polymorphic, base = "polymorphism::A")]
struct B {
	a: i32,
	b: i32,
}

#[derive(Debug, Clone, PartialEq, Nino)]
#[nino(polymorphic, base = "polymorphism::B")]
struct C {
	a: i32,
	b: i32,
	c: i32,
}

#[derive(Nino)]
struct Holder {
	child: Polymorphic,
}

#[test]
fn polymorphic_member_decodes_a_base_chain_at_its_static_type() {
	let value = Holder { child: Polymorphic::new(C { a: 1, b: 2, c: 3 }) };
	let mut writer = Writer::new();
	value.encode(&mut writer);
	let bytes = writer.into_bytes();

	let mut expected = Writer::new();
	expected.write_type_id(TypeId::of_fqn("polymorphism::C").raw());
	1i32.encode(&mut expected);
	2i32.encode(&mut expected);
	3i32.encode(&mut expected);
	assert_eq!(bytes, expected.into_bytes());

	let mut reader = Reader::new(&bytes);
	let decoded = Holder::decode(&mut reader).unwrap();
	let c = decoded.child.downcast_ref::<C>().unwrap();
	assert_eq!(c, &C { a: 1, b: 2, c: 3 });
}

#[test]
fn unregistered_value_encodes_as_the_null_type_id() {
	struct NotRegistered;
	let value: Box<dyn Any> = Box::new(NotRegistered);
	let mut writer = Writer::new();
	encode_polymorphic(value.as_ref(), &mut writer);
	let bytes = writer.into_bytes();

	let mut reader = Reader::new(&bytes);
	assert_eq!(decode_polymorphic(&mut reader).unwrap(), None);
}
