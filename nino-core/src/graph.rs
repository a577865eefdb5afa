//! The graph builder (C3): merges extracted [`NinoType`]s into a directed
//! base→derived hierarchy, dedupes by [`TypeId`], and classifies every
//! node as top, circular and/or polymorphic.
//!
//! This runs exactly once per input batch, on a single thread (spec.md
//! §5) — in this crate split that batch is "every `TypeDescriptor`
//! `inventory` collected across the linked binary", gathered lazily the
//! first time `nino::registry::graph()` is called.

use std::collections::VecDeque;

use derivative::Derivative;
use fxhash::{FxHashMap, FxHashSet};

use crate::model::NinoType;
use crate::type_id::TypeId;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GraphError {
	/// Two distinct registrations hashed to the same [`TypeId`] but carry
	/// different content — a real hash collision, or (far more likely) a
	/// duplicate `#[derive(Nino)]` expansion pulled in twice by two
	/// versions of the same crate.
	DuplicateTypeIdMismatch(TypeId),
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct NinoGraph {
	nodes: FxHashMap<TypeId, NinoType>,
	/// All transitive ancestors of a node, in walk order, duplicates
	/// suppressed.
	base_types: FxHashMap<TypeId, Vec<TypeId>>,
	/// Inverse of `base_types`: every (possibly indirect) descendant of a
	/// node, in the order subtype inversion first encountered them.
	sub_types: FxHashMap<TypeId, Vec<TypeId>>,
	top_types: FxHashSet<TypeId>,
	circular_types: FxHashSet<TypeId>,
	#[derivative(Debug = "ignore")]
	by_display_name: FxHashMap<String, TypeId>,
}

impl NinoGraph {
	pub fn get(&self, id: TypeId) -> Option<&NinoType> {
		self.nodes.get(&id)
	}

	pub fn by_display_name(&self, name: &str) -> Option<&NinoType> {
		self.by_display_name.get(name).and_then(|id| self.get(*id))
	}

	pub fn base_types(&self, id: TypeId) -> &[TypeId] {
		self.base_types.get(&id).map(Vec::as_slice).unwrap_or(&[])
	}

	/// All known concrete subtypes of `id`, ordered deepest-first by
	/// ancestor count — the order spec.md §4.4.1/§4.4.2 requires for
	/// polymorphic serializer/deserializer `switch` branches.
	pub fn sub_types_deepest_first(&self, id: TypeId) -> Vec<TypeId> {
		let mut subs = self
			.sub_types
			.get(&id)
			.cloned()
			.unwrap_or_default();
		subs.sort_by_key(|sub_id| std::cmp::Reverse(self.base_types(*sub_id).len()));
		subs
	}

	pub fn is_top_type(&self, id: TypeId) -> bool {
		self.top_types.contains(&id)
	}

	pub fn is_circular(&self, id: TypeId) -> bool {
		self.circular_types.contains(&id)
	}

	pub fn nodes(&self) -> impl Iterator<Item = &NinoType> {
		self.nodes.values()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Builds a [`NinoGraph`] from a batch of extracted types.
///
/// Dedup is by [`TypeId`]; since Rust items have no class-inheritance
/// notion of "direct vs. inherited attribute" (spec.md §4.2's
/// attribute-inheritance search does not apply — every `#[derive(Nino)]`
/// item is found directly), the only thing dedup needs to resolve is two
/// registrations racing to the same id, which is reported as
/// [`GraphError::DuplicateTypeIdMismatch`] rather than silently resolved.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn build_graph(types: Vec<NinoType>) -> Result<NinoGraph, GraphError> {
	let mut nodes: FxHashMap<TypeId, NinoType> = FxHashMap::default();
	for ty in types {
		let id = ty.type_id();
		match nodes.get(&id) {
			None => {
				nodes.insert(id, ty);
			}
			Some(existing) if *existing == ty => {}
			Some(_) => return Err(GraphError::DuplicateTypeIdMismatch(id)),
		}
	}

	let known_ids: FxHashSet<TypeId> = nodes.keys().copied().collect();

	let mut base_types: FxHashMap<TypeId, Vec<TypeId>> = FxHashMap::default();
	for (&id, ty) in nodes.iter() {
		let mut ancestors = Vec::new();
		let mut seen = FxHashSet::default();
		let mut frontier: VecDeque<TypeId> = ty.parent_ids.iter().copied().collect();
		while let Some(parent) = frontier.pop_front() {
			if !known_ids.contains(&parent) {
				continue; // external base — silently dropped, not an error
			}
			if !seen.insert(parent) {
				continue;
			}
			ancestors.push(parent);
			if let Some(grandparent) = nodes.get(&parent) {
				for gp in &grandparent.parent_ids {
					frontier.push_back(*gp);
				}
			}
		}
		base_types.insert(id, ancestors);
	}

	let mut sub_types: FxHashMap<TypeId, Vec<TypeId>> = FxHashMap::default();
	for (&id, ancestors) in base_types.iter() {
		for &ancestor in ancestors {
			let entry = sub_types.entry(ancestor).or_default();
			if !entry.contains(&id) {
				entry.push(id);
			}
		}
	}

	let top_types: FxHashSet<TypeId> = base_types
		.iter()
		.filter(|(_, ancestors)| ancestors.is_empty())
		.map(|(id, _)| *id)
		.collect();

	let circular_types = detect_circular_types(&nodes, &base_types);

	let mut by_display_name = FxHashMap::default();
	for (&id, ty) in nodes.iter() {
		by_display_name.insert(ty.info.display_name.clone(), id);
	}

	let mut nodes_with_flags = nodes;
	for (id, ty) in nodes_with_flags.iter_mut() {
		let ancestors = base_types.get(id).cloned().unwrap_or_default();
		ty.is_polymorphic = !ancestors.is_empty() || ty.info.is_polymorphic;
		ty.is_circular = circular_types.contains(id);
		ty.hierarchy_level = ancestors.len() as u32;
	}

	Ok(NinoGraph {
		nodes: nodes_with_flags,
		base_types,
		sub_types,
		top_types,
		circular_types,
		by_display_name,
	})
}

/// Bounded DFS per spec.md §4.3: value types and unmanaged members cannot
/// contribute to a cycle, so only reference-typed `NinoType`s are probed,
/// and an edge exists on self-reference, on a reference to any ancestor
/// of the node being probed (an upward reference counts as cyclic for
/// polymorphic-dispatch purposes), or transitively through another
/// `NinoType`'s members.
fn detect_circular_types(
	nodes: &FxHashMap<TypeId, NinoType>,
	base_types: &FxHashMap<TypeId, Vec<TypeId>>,
) -> FxHashSet<TypeId> {
	let mut circular = FxHashSet::default();

	for (&root, root_ty) in nodes.iter() {
		if root_ty.info.is_value_type {
			continue;
		}
		let ancestors_of_root: FxHashSet<TypeId> =
			base_types.get(&root).cloned().unwrap_or_default().into_iter().collect();

		let mut visited = FxHashSet::default();
		let mut stack = vec![root];
		let mut closes_cycle = false;

		while let Some(current) = stack.pop() {
			if !visited.insert(current) {
				continue;
			}
			let Some(current_ty) = nodes.get(&current) else { continue };
			for member in &current_ty.members {
				if member.ty.is_value_type && member.ty.is_unmanaged {
					continue;
				}
				for target in member_edge_targets(&member.ty) {
					if target == root || ancestors_of_root.contains(&target) {
						closes_cycle = true;
					}
					if nodes.contains_key(&target) {
						stack.push(target);
					}
				}
			}
		}

		if closes_cycle {
			circular.insert(root);
		}
	}

	circular
}

/// Every `TypeId` a member's type could carry a reference through:
/// itself (if it directly names a `NinoType`), its generic arguments,
/// its array element, and its `Option` underlying type.
fn member_edge_targets(ty: &crate::model::TypeInfo) -> Vec<TypeId> {
	let mut out = vec![ty.type_id];
	for arg in &ty.generic_args {
		out.extend(member_edge_targets(arg));
	}
	if let Some((elem, _)) = &ty.array_element {
		out.extend(member_edge_targets(elem));
	}
	if let Some(underlying) = &ty.nullable_underlying {
		out.extend(member_edge_targets(underlying));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Accessibility, NinoMember, TypeInfo, TypeKind};

	fn leaf_type(name: &str, parents: &[TypeId]) -> NinoType {
		let type_id = TypeId::of_fqn(name);
		NinoType {
			info: TypeInfo {
				fqn: name.to_string(),
				type_id,
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
				display_name: name.to_string(),
				instance_name: TypeInfo::derive_instance_name(name),
			},
			members: vec![],
			parent_ids: parents.to_vec(),
			custom_serializer: None,
			custom_deserializer: None,
			ref_deserialization_factory: None,
			constructors: vec![],
			is_polymorphic: false,
			is_circular: false,
			hierarchy_level: 0,
		}
	}

	#[test]
	fn hierarchy_base_walk_and_subtype_inversion() {
		let a = leaf_type("A", &[]);
		let b = leaf_type("B", &[a.type_id()]);
		let c = leaf_type("C", &[b.type_id()]);

		let ids = (a.type_id(), b.type_id(), c.type_id());
		let graph = build_graph(vec![a, b, c]).unwrap();

		assert!(graph.is_top_type(ids.0));
		assert!(!graph.is_top_type(ids.1));
		assert_eq!(graph.base_types(ids.2), &[ids.1, ids.0]);

		let subs_of_a = graph.sub_types_deepest_first(ids.0);
		assert_eq!(subs_of_a, vec![ids.2, ids.1]);
	}

	#[test]
	fn unresolved_parent_does_not_error() {
		let orphan = leaf_type("Orphan", &[TypeId::of_fqn("external::Missing")]);
		let graph = build_graph(vec![orphan.clone()]).unwrap();
		assert!(graph.base_types(orphan.type_id()).is_empty());
		assert!(graph.is_top_type(orphan.type_id()));
	}

	#[test]
	fn self_referencing_type_is_circular() {
		let mut node = leaf_type("Node", &[]);
		node.members.push(NinoMember {
			name: "next".into(),
			ty: node.info.clone(),
			is_constructor_parameter: false,
			is_private: false,
			is_property: false,
			is_utf8_string: false,
			is_static: false,
			is_read_only: false,
			custom_formatter: None,
		});
		let id = node.type_id();
		let graph = build_graph(vec![node]).unwrap();
		assert!(graph.is_circular(id));
	}

	#[test]
	fn acyclic_reference_chain_is_not_circular() {
		let leaf = leaf_type("Leaf", &[]);
		let mut root = leaf_type("Root", &[]);
		root.members.push(NinoMember {
			name: "child".into(),
			ty: leaf.info.clone(),
			is_constructor_parameter: false,
			is_private: false,
			is_property: false,
			is_utf8_string: false,
			is_static: false,
			is_read_only: false,
			custom_formatter: None,
		});
		let root_id = root.type_id();
		let graph = build_graph(vec![root, leaf]).unwrap();
		assert!(!graph.is_circular(root_id));
	}

	#[test]
	fn duplicate_registration_with_identical_content_is_idempotent() {
		let a = leaf_type("A", &[]);
		let graph = build_graph(vec![a.clone(), a.clone()]).unwrap();
		assert_eq!(graph.len(), 1);
	}

	#[test]
	fn duplicate_registration_with_conflicting_content_errors() {
		let mut a = leaf_type("A", &[]);
		let mut a2 = a.clone();
		a.members.push(NinoMember {
			name: "x".into(),
			ty: a.info.clone(),
			is_constructor_parameter: false,
			is_private: false,
			is_property: false,
			is_utf8_string: false,
			is_static: false,
			is_read_only: false,
			custom_formatter: None,
		});
		a2.hierarchy_level = 7;
		let err = build_graph(vec![a, a2]).unwrap_err();
		assert!(matches!(err, GraphError::DuplicateTypeIdMismatch(_)));
	}
}
