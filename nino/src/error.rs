//! Runtime error kind for the emitted code's decode path (spec.md §7.4,
//! `InvalidPayload`). The generator-side kinds never reach this type —
//! they are macro-expansion-time outcomes in `nino-derive`, not values a
//! running program observes: `StructuralReject` (generics, unions) is a
//! silent no-op expansion, while malformed `#[nino(...)]` attribute input
//! still aborts expansion via `panic!`.
//!
//! Kept as a plain enum with a manual `Display`/`Error` impl rather than
//! pulling in `thiserror`.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NinoError {
	/// An unknown polymorphic type id, an impossible collection length, a
	/// failed constructor invocation, or any other payload that cannot be
	/// the product of a conforming encoder.
	InvalidPayload(String),
}

impl Display for NinoError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			NinoError::InvalidPayload(msg) => write!(f, "invalid Nino payload: {msg}"),
		}
	}
}

impl std::error::Error for NinoError {}

pub type NinoResult<T> = Result<T, NinoError>;
