//! The link-time half of the pipeline: where "the whole compilation", which
//! a single `#[derive(Nino)]` expansion never gets to see, actually comes
//! together.
//!
//! Every `#[derive(Nino)]` expansion submits one [`nino_core::registration::TypeDescriptor`]
//! and, for polymorphic types, one [`DispatchEntry`] via `inventory::submit!`.
//! `inventory` gathers every submission made by every linked crate before
//! `main` runs, so graph construction (C3) and dispatch-table population
//! happen exactly once, lazily, on first use — no assembly-load-order
//! dependency the way the source system's scanner has (spec.md §9 Open
//! Question, resolved in favour of link-time collection).

use std::any::Any;
use std::sync::OnceLock;

use fxhash::FxHashMap;
use nino_core::graph::{build_graph, NinoGraph};
use nino_core::registration::TypeDescriptor;
use nino_core::TypeId;

use crate::error::{NinoError, NinoResult};
use crate::reader::Reader;
use crate::writer::Writer;

/// The polymorphic dispatch glue for one concrete type: enough to encode a
/// type-erased value with its wire-format type-id prefix, and to decode a
/// boxed value back out given only that prefix (spec.md §9 "runtime type
/// dispatch without virtual methods").
pub struct DispatchEntry {
	pub type_id: u32,
	pub rust_type: fn() -> std::any::TypeId,
	pub encode: fn(&dyn Any, &mut Writer),
	pub decode: fn(&mut Reader) -> NinoResult<Box<dyn Any>>,
}

inventory::collect!(DispatchEntry);

/// Builds a [`DispatchEntry`] for `T`. Emitted registration code calls this
/// once per polymorphic type and hands the result to `inventory::submit!`;
/// see `nino-derive`'s registration emission stage.
pub const fn dispatch_entry<T>(type_id: u32) -> DispatchEntry
where
	T: crate::traits::NinoEncode + crate::traits::NinoDecode + Any,
{
	DispatchEntry {
		type_id,
		rust_type: std::any::TypeId::of::<T>,
		encode: |value, writer| {
			let value = value.downcast_ref::<T>().expect("dispatch type mismatch");
			value.encode(writer);
		},
		decode: |reader| Ok(Box::new(T::decode(reader)?)),
	}
}

struct Dispatch {
	by_nino_id: FxHashMap<u32, &'static DispatchEntry>,
	by_rust_type: FxHashMap<std::any::TypeId, &'static DispatchEntry>,
}

static GRAPH: OnceLock<NinoGraph> = OnceLock::new();
static DISPATCH: OnceLock<Dispatch> = OnceLock::new();

/// Lazily builds and caches the type graph from every `TypeDescriptor`
/// registered in the linked binary. Idempotent: later calls return the
/// same graph instance (spec.md §6 "Generated registration entrypoint").
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn graph() -> &'static NinoGraph {
	GRAPH.get_or_init(|| {
		let descriptors: Vec<&'static TypeDescriptor> = inventory::iter::<TypeDescriptor>().collect();
		let types = descriptors.iter().map(|d| d.to_nino_type(&descriptors)).collect();
		build_graph(types).expect("conflicting type registrations linked into this binary")
	})
}

fn dispatch() -> &'static Dispatch {
	DISPATCH.get_or_init(|| {
		let mut by_nino_id = FxHashMap::default();
		let mut by_rust_type = FxHashMap::default();
		for entry in inventory::iter::<DispatchEntry>() {
			by_nino_id.insert(entry.type_id, entry);
			by_rust_type.insert((entry.rust_type)(), entry);
		}
		Dispatch { by_nino_id, by_rust_type }
	})
}

/// Forces both the type graph and the dispatch table to materialize. Never
/// required for correctness — every other entry point initializes lazily —
/// but useful to pay that cost up front, e.g. at process startup.
pub fn init() {
	graph();
	dispatch();
}

/// Writes `value`'s Nino type-id prefix followed by its encoded bytes,
/// looking up the encoder by `value`'s concrete Rust type (spec.md §4.4.2
/// "polymorphic member encode").
pub fn encode_polymorphic(value: &dyn Any, writer: &mut Writer) {
	let table = dispatch();
	match table.by_rust_type.get(&value.type_id()) {
		Some(entry) => {
			writer.write_type_id(entry.type_id);
			(entry.encode)(value, writer);
		}
		None => writer.write_type_id(nino_core::type_id::NULL_TYPE_ID),
	}
}

/// Reads a Nino type-id prefix and dispatches to the matching decoder.
/// `NULL_TYPE_ID` decodes to `Ok(None)`; an id with no matching registration
/// is a malformed payload, not a silent null (spec.md §9 "unknown
/// discriminator").
pub fn decode_polymorphic(reader: &mut Reader) -> NinoResult<Option<Box<dyn Any>>> {
	let id = reader.read_type_id()?;
	if id == nino_core::type_id::NULL_TYPE_ID {
		return Ok(None);
	}
	let table = dispatch();
	match table.by_nino_id.get(&id) {
		Some(entry) => Ok(Some((entry.decode)(reader)?)),
		None => Err(NinoError::InvalidPayload(format!(
			"no registered type for wire type-id {id}"
		))),
	}
}

/// Looks up a type's full pipeline metadata by its Nino [`TypeId`], e.g. to
/// walk `sub_types_deepest_first` when emitting a `switch`-style decoder
/// outside of the derive macro (diagnostics, tooling).
pub fn type_info(id: TypeId) -> Option<&'static nino_core::model::NinoType> {
	graph().get(id)
}
