//! The `'static`, allocation-free mirror of [`NinoType`]/[`NinoMember`]
//! that a `#[derive(Nino)]` expansion can build as a literal constant and
//! hand to `inventory::submit!`. `inventory` requires every submitted
//! value to be constructible in a `static` initializer, which rules out
//! `String`/`Vec` — hence this separate, borrowed-everything shape.
//!
//! A [`TypeDescriptor`] is converted into an owned [`NinoType`] exactly
//! once, the first time the graph is built (see `nino::registry`).

use crate::model::{
	Accessibility, ConstructorInfo, ConstructorParam, NinoMember, NinoType, TypeInfo, TypeKind,
};
use crate::type_id::TypeId;

#[derive(Debug, Copy, Clone)]
pub struct MemberDescriptor {
	pub name: &'static str,
	pub type_fqn: &'static str,
	pub is_private: bool,
	pub is_utf8_string: bool,
	pub is_unmanaged: bool,
	/// `#[nino(formatter = "...")]`'s argument, verbatim. Display-only: never
	/// consulted by `encode`/`decode`.
	pub custom_formatter: Option<&'static str>,
}

#[derive(Debug, Copy, Clone)]
pub struct ConstructorParamDescriptor {
	pub name: &'static str,
	pub type_fqn: &'static str,
}

#[derive(Debug, Copy, Clone)]
pub struct ConstructorDescriptor {
	pub params: &'static [ConstructorParamDescriptor],
	pub has_explicit_ordering: bool,
}

#[derive(Debug, Copy, Clone)]
pub struct TypeDescriptor {
	pub fqn: &'static str,
	pub type_id: u32,
	pub kind: TypeKind,
	pub is_sealed: bool,
	pub is_polymorphic: bool,
	/// Parent type/trait FQNs, depth-first base-first, declaration order.
	pub parents: &'static [&'static str],
	pub members: &'static [MemberDescriptor],
	pub constructors: &'static [ConstructorDescriptor],
}

inventory::collect!(TypeDescriptor);

impl TypeDescriptor {
	/// Builds the owned pipeline DTR this descriptor stands in for.
	/// Parent FQNs are resolved against `all` (every other registered
	/// descriptor) so the resulting `NinoType.parent_ids` only ever
	/// contains ids that are actually present in this program's graph —
	/// unresolved (external) parents are silently dropped here, exactly
	/// as the base-walk step of C3 requires.
	pub fn to_nino_type(&self, all: &[&'static TypeDescriptor]) -> NinoType {
		let resolve = |fqn: &str| -> Option<TypeId> {
			all.iter()
				.find(|d| d.fqn == fqn)
				.map(|d| TypeId::of_fqn(d.fqn))
		};

		let parent_ids = self.parents.iter().filter_map(|p| resolve(p)).collect();

		let members = self
			.members
			.iter()
			.map(|m| NinoMember {
				name: m.name.to_string(),
				ty: simple_type_info(m.type_fqn, m.is_unmanaged),
				is_constructor_parameter: false,
				is_private: m.is_private,
				is_property: false,
				is_utf8_string: m.is_utf8_string,
				is_static: false,
				is_read_only: false,
				custom_formatter: m.custom_formatter.map(|s| s.to_string()),
			})
			.collect();

		let constructors = self
			.constructors
			.iter()
			.map(|c| ConstructorInfo {
				params: c
					.params
					.iter()
					.map(|p| ConstructorParam {
						name: p.name.to_string(),
						ty: simple_type_info(p.type_fqn, false),
					})
					.collect(),
				has_explicit_ordering: c.has_explicit_ordering,
				parameter_name_override: None,
				is_primary_constructor: false,
				is_factory: false,
				factory_method_name: None,
			})
			.collect();

		NinoType {
			info: TypeInfo {
				fqn: self.fqn.to_string(),
				type_id: TypeId::from_raw(self.type_id),
				kind: self.kind,
				accessibility: Accessibility::Public,
				is_value_type: false,
				is_unmanaged: false,
				is_polymorphic: self.is_polymorphic,
				is_sealed: self.is_sealed,
				generic_args: vec![],
				array_element: None,
				nullable_underlying: None,
				tuple_elements: vec![],
				display_name: self.fqn.to_string(),
				instance_name: TypeInfo::derive_instance_name(self.fqn),
			},
			members,
			parent_ids,
			custom_serializer: None,
			custom_deserializer: None,
			ref_deserialization_factory: None,
			constructors,
			is_polymorphic: self.is_polymorphic,
			is_circular: false,
			hierarchy_level: 0,
		}
	}
}

/// `is_unmanaged` is the only flag a [`MemberDescriptor`] actually knows
/// about its own type; every unmanaged primitive happens to be a value
/// type too, so `is_value_type` is derived from it rather than carrying a
/// second, always-identical field through the descriptor.
fn simple_type_info(fqn: &str, is_unmanaged: bool) -> TypeInfo {
	TypeInfo {
		fqn: fqn.to_string(),
		type_id: TypeId::of_fqn(fqn),
		kind: TypeKind::Builtin,
		accessibility: Accessibility::Public,
		is_value_type: is_unmanaged,
		is_unmanaged,
		is_polymorphic: false,
		is_sealed: true,
		generic_args: vec![],
		array_element: None,
		nullable_underlying: None,
		tuple_elements: vec![],
		display_name: fqn.to_string(),
		instance_name: TypeInfo::derive_instance_name(fqn),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unresolved_parent_is_dropped_not_errored() {
		static LEAF: TypeDescriptor = TypeDescriptor {
			fqn: "crate::Leaf",
			type_id: 1,
			kind: TypeKind::Struct,
			is_sealed: true,
			is_polymorphic: false,
			parents: &["external::crate::NotRegistered"],
			members: &[],
			constructors: &[],
		};
		let nino_type = LEAF.to_nino_type(&[&LEAF]);
		assert!(nino_type.parent_ids.is_empty());
	}

	#[test]
	fn an_unmanaged_member_is_flagged_unmanaged_and_value_type() {
		static WITH_MEMBERS: TypeDescriptor = TypeDescriptor {
			fqn: "crate::Point",
			type_id: 2,
			kind: TypeKind::Struct,
			is_sealed: true,
			is_polymorphic: false,
			parents: &[],
			members: &[
				MemberDescriptor {
					name: "x",
					type_fqn: "i32",
					is_private: false,
					is_utf8_string: false,
					is_unmanaged: true,
					custom_formatter: None,
				},
				MemberDescriptor {
					name: "label",
					type_fqn: "alloc::string::String",
					is_private: false,
					is_utf8_string: false,
					is_unmanaged: false,
					custom_formatter: None,
				},
			],
			constructors: &[],
		};
		let nino_type = WITH_MEMBERS.to_nino_type(&[&WITH_MEMBERS]);
		assert!(nino_type.members[0].ty.is_unmanaged);
		assert!(nino_type.members[0].ty.is_value_type);
		assert!(!nino_type.members[1].ty.is_unmanaged);
	}
}
