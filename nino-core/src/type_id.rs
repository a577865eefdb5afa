//! Deterministic wire-level type identity.
//!
//! A [`TypeId`] is a 32-bit hash of a type's fully-qualified name. It is
//! computed once, at extraction time (C1), and never recomputed from a
//! runtime identity — two [`TypeId`]s are equal iff the strings that
//! produced them were equal, across processes, platforms and compiler
//! versions. This is the wire tag used for polymorphic dispatch (§6) and
//! the dispatch-table key (§9).

use std::fmt::{Debug, Formatter};

/// The reserved id written in place of a polymorphic reference value that
/// is `None`/null. No real type may hash to this value in practice, but
/// nothing special prevents it; ties are broken by reserving the constant
/// regardless of what [`hash_fqn`] would have produced.
pub const NULL_TYPE_ID: u32 = 0;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
	#[inline]
	pub const fn of_fqn(fqn: &str) -> Self {
		Self(hash_fqn(fqn))
	}

	#[inline]
	pub const fn from_raw(raw: u32) -> Self {
		Self(raw)
	}

	#[inline]
	pub const fn raw(self) -> u32 {
		self.0
	}

	#[inline]
	pub const fn is_null(self) -> bool {
		self.0 == NULL_TYPE_ID
	}

	pub const NULL: TypeId = TypeId(NULL_TYPE_ID);
}

impl Debug for TypeId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "TypeId({:#010x})", self.0)
	}
}

/// Two-lane xorshift-multiply string hash, a dual djb2 variant. Both lanes
/// seed from the same djb2 constant so the result depends only on the
/// bytes of `fqn`, never on allocator addresses, hash-map iteration order,
/// or the host's pointer width.
///
/// Collisions are accepted the same way the source system accepts them:
/// the id space is dense enough in practice and the cost of a false
/// positive (two unrelated types sharing a dispatch slot) is treated as
/// an invalid-payload class of bug at decode time, not something this
/// hash tries to eliminate structurally.
pub const fn hash_fqn(fqn: &str) -> u32 {
	let bytes = fqn.as_bytes();

	let mut lane_a: u32 = 5381;
	let mut lane_b: u32 = 5381 ^ 0x9e37_79b9;

	// Indexed `while` rather than a `for` over an iterator so this stays
	// callable from a `const` initializer — `#[derive(Nino)]` expansions
	// compute a type's `TypeId` at the registration site this way.
	let mut i = 0;
	while i < bytes.len() {
		let byte = bytes[i];
		lane_a = lane_a.wrapping_mul(33) ^ byte as u32;
		lane_b = (lane_b ^ byte as u32).wrapping_mul(0x85eb_ca6b);
		lane_b = lane_b.rotate_left(13);
		i += 1;
	}

	lane_a ^ lane_b.wrapping_mul(0xc2b2_ae35)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stable_across_calls() {
		assert_eq!(hash_fqn("My.Namespace.Foo"), hash_fqn("My.Namespace.Foo"));
	}

	#[test]
	fn sensitive_to_content() {
		assert_ne!(hash_fqn("My.Namespace.Foo"), hash_fqn("My.Namespace.Bar"));
	}

	#[test]
	fn type_id_depends_only_on_fqn() {
		let a = TypeId::of_fqn("crate::Foo");
		let b = TypeId::of_fqn("crate::Foo");
		assert_eq!(a, b);
	}

	#[test]
	fn null_is_reserved() {
		assert!(TypeId::NULL.is_null());
		assert_eq!(TypeId::NULL.raw(), NULL_TYPE_ID);
	}
}
