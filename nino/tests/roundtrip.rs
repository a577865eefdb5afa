use nino::{NinoDecode, NinoEncode, Nino, Reader, Writer};

#[derive(Debug, Clone, PartialEq, Nino)]
struct Point {
	x: i32,
	y: i32,
}

#[derive(Debug, Clone, PartialEq, Nino)]
struct Player {
	name: String,
	#[nino(utf8)]
	tag: String,
	position: Point,
	inventory: Vec<i32>,
	nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Nino)]
struct Ordered {
	#[nino(order = 1)]
	second: u8,
	#[nino(order = 0)]
	first: u8,
	third: u8,
}

#[derive(Debug, Clone, PartialEq, Nino)]
struct Coordinates(i32, i32);

#[derive(Debug, Clone, PartialEq, Nino)]
enum Shape {
	Circle { radius: f64 },
	Rectangle { width: f64, height: f64 },
	Point,
}

fn round_trip<T: NinoEncode + NinoDecode + PartialEq + std::fmt::Debug>(value: T) {
	let mut writer = Writer::new();
	value.encode(&mut writer);
	let bytes = writer.into_bytes();
	let mut reader = Reader::new(&bytes);
	let decoded = T::decode(&mut reader).unwrap();
	assert_eq!(value, decoded);
}

#[test]
fn nested_struct_round_trips() {
	round_trip(Player {
		name: "Aria".to_string(),
		tag: "#1234".to_string(),
		position: Point { x: 3, y: -4 },
		inventory: vec![1, 2, 3],
		nickname: Some("Ari".to_string()),
	});
}

#[test]
fn missing_nickname_round_trips_as_none() {
	round_trip(Player {
		name: "Bo".to_string(),
		tag: "#0001".to_string(),
		position: Point { x: 0, y: 0 },
		inventory: vec![],
		nickname: None,
	});
}

#[test]
fn explicit_field_order_is_honoured_on_the_wire() {
	let value = Ordered { first: 1, second: 2, third: 3 };
	let mut writer = Writer::new();
	value.encode(&mut writer);
	let bytes = writer.into_bytes();
	// `first` (order 0) then `second` (order 1) then `third` (declaration order).
	assert_eq!(bytes, [1, 2, 3]);
	round_trip(value);
}

#[test]
fn tuple_struct_round_trips() {
	round_trip(Coordinates(10, -20));
}

#[test]
fn enum_variants_round_trip() {
	round_trip(Shape::Circle { radius: 2.5 });
	round_trip(Shape::Rectangle { width: 4.0, height: 5.0 });
	round_trip(Shape::Point);
}

#[test]
fn unknown_discriminant_is_rejected() {
	let mut writer = Writer::new();
	writer.write_unmanaged(&99u32);
	let bytes = writer.into_bytes();
	let mut reader = Reader::new(&bytes);
	assert!(Shape::decode(&mut reader).is_err());
}
