//! The data-transfer records (DTRs) that flow from extraction (C1/C2)
//! through the graph builder (C3). Every type here is owned, `Clone`,
//! `Eq` and `Hash` by content — equal content implies equal hash implies
//! equal bytes wherever it matters, which is the caching contract the
//! whole pipeline relies on (spec.md §3).
//!
//! Nothing in this module ever borrows from, or stores a handle into,
//! the host's metadata (here, `syn`'s AST). That boundary is held by
//! construction: only `nino-derive`'s extraction stage builds these
//! values, and it always copies the data it needs out of `syn` first.

use crate::type_id::TypeId;

/// Coarse classification of a type, standing in for the richer
/// `Kind`/`SpecialType` pair of the source system. Rust has no distinct
/// "interface" kind at the value level, but `Trait` plays the same role
/// for polymorphic dispatch (spec.md §9: "no virtual methods required").
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TypeKind {
	Struct,
	TupleStruct,
	Enum,
	Trait,
	/// A structural builtin (collection, tuple, `Option`, …) — handled by
	/// the generic codecs in `nino::codecs` rather than by emitted code.
	Builtin,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Accessibility {
	Public,
	Private,
	/// Crate-visible (`pub(crate)`) or module-visible (`pub(in path)`).
	Restricted,
}

/// Identity and classification of a single type, recursively fully
/// materialized for generic arguments, array elements and the `Option`
/// underlying type — never a forward reference, so structural equality
/// is just derived equality.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TypeInfo {
	/// Fully-qualified name. For Rust this is the macro's best compile-time
	/// approximation of a path: the defining module path joined with the
	/// item's own name, since true name resolution is a type-checker
	/// capability `syn` does not expose (documented as a resolved Open
	/// Question in DESIGN.md).
	pub fqn: String,
	pub type_id: TypeId,
	pub kind: TypeKind,
	pub accessibility: Accessibility,
	pub is_value_type: bool,
	pub is_unmanaged: bool,
	pub is_polymorphic: bool,
	pub is_sealed: bool,
	/// Generic type arguments, in declaration order, each fully resolved.
	pub generic_args: Vec<TypeInfo>,
	/// `Some(element)` when this `TypeInfo` describes `[T; N]` or `Vec<T>`-
	/// shaped data; `N` is `None` for growable collections.
	pub array_element: Option<(Box<TypeInfo>, Option<usize>)>,
	/// `Some(underlying)` when this describes `Option<T>`.
	pub nullable_underlying: Option<Box<TypeInfo>>,
	/// Tuple element types; empty unless `kind` represents a tuple shape.
	pub tuple_elements: Vec<TypeInfo>,
	pub display_name: String,
	pub instance_name: String,
}

impl TypeInfo {
	/// Lowercases `display_name`, maps every non-alphanumeric byte to `_`,
	/// and prefixes it with a sigil reserved so generated locals can never
	/// collide with a user-written identifier.
	pub fn derive_instance_name(display_name: &str) -> String {
		let mut name = String::with_capacity(display_name.len() + 2);
		name.push_str("__n_");
		for ch in display_name.chars() {
			if ch.is_ascii_alphanumeric() {
				name.push(ch.to_ascii_lowercase());
			} else {
				name.push('_');
			}
		}
		name
	}

	/// Rewrites `T[*,*]`-style multi-dimensional array syntax to `T[,]`.
	/// Rust has no multi-rank array type, so this is a no-op kept only so
	/// that any array-shaped `TypeInfo` built from a textual description
	/// (e.g. diagnostics) never carries the sanitization-pending form.
	pub fn sanitize_display_name(name: &str) -> String {
		name.replace("[*]", "[]").replace("[*,*]", "[,]")
	}
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct NinoMember {
	pub name: String,
	pub ty: TypeInfo,
	pub is_constructor_parameter: bool,
	pub is_private: bool,
	pub is_property: bool,
	pub is_utf8_string: bool,
	pub is_static: bool,
	pub is_read_only: bool,
	/// Display name of a user-declared custom formatter for this member,
	/// if `#[nino(formatter = "...")]` was present.
	pub custom_formatter: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ConstructorParam {
	pub name: String,
	pub ty: TypeInfo,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ConstructorInfo {
	pub params: Vec<ConstructorParam>,
	pub has_explicit_ordering: bool,
	pub parameter_name_override: Option<Vec<String>>,
	pub is_primary_constructor: bool,
	pub is_factory: bool,
	/// Method name when this is a static-factory constructor, e.g. a
	/// `#[nino(ctor = "path::to::fn")]` target.
	pub factory_method_name: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct NinoType {
	pub info: TypeInfo,
	pub members: Vec<NinoMember>,
	/// Base type/trait ids, in depth-first base-first declaration order
	/// (spec.md §9: "source order is depth-first, base-first,
	/// interfaces-in-declaration-order" — preserved exactly).
	pub parent_ids: Vec<TypeId>,
	pub custom_serializer: Option<String>,
	pub custom_deserializer: Option<String>,
	pub ref_deserialization_factory: Option<String>,
	pub constructors: Vec<ConstructorInfo>,
	/// Filled in by C3; `None` until the node has gone through the graph
	/// builder.
	pub is_polymorphic: bool,
	pub is_circular: bool,
	pub hierarchy_level: u32,
}

impl NinoType {
	pub fn type_id(&self) -> TypeId {
		self.info.type_id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn instance_name_is_collision_safe_and_lowercase() {
		let name = TypeInfo::derive_instance_name("Dictionary<int,int>");
		assert!(name.starts_with("__n_"));
		assert_eq!(name, "__n_dictionary_int_int_");
	}

	#[test]
	fn multi_dim_array_syntax_is_sanitized() {
		assert_eq!(TypeInfo::sanitize_display_name("T[*,*]"), "T[,]");
	}

	#[test]
	fn value_equality_matches_content_not_identity() {
		let a = TypeInfo {
			fqn: "crate::Foo".into(),
			type_id: TypeId::of_fqn("crate::Foo"),
			kind: TypeKind::Struct,
			accessibility: Accessibility::Public,
			is_value_type: false,
			is_unmanaged: false,
			is_polymorphic: false,
			is_sealed: true,
			generic_args: vec![],
			array_element: None,
			nullable_underlying: None,
			tuple_elements: vec![],
			display_name: "Foo".into(),
			instance_name: "__n_foo".into(),
		};
		let b = a.clone();
		assert_eq!(a, b);
	}
}
