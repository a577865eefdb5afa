//! Runtime half of the Nino binary serialization framework: the wire
//! reader/writer, the `NinoEncode`/`NinoDecode` traits every emitted and
//! structural-builtin type implements, and the link-time type graph and
//! dispatch table that `#[derive(Nino)]` expansions register into.
//!
//! Enable the `derive` feature (on by default) to bring in `#[derive(Nino)]`
//! itself; enable `weak-version-tolerance` to accept payloads written by a
//! newer or older version of a type (spec.md §7).

mod codecs;
mod error;
mod reader;
mod writer;

pub mod registry;
pub mod traits;

pub use error::{NinoError, NinoResult};
pub use reader::Reader;
pub use writer::Writer;
#[cfg(feature = "weak-version-tolerance")]
pub use writer::FrameHandle;
pub use traits::{NinoDecode, NinoEncode, Unmanaged};
pub use codecs::{NinoPriorityQueue, NinoQueue, NinoStack, Nullable, Polymorphic};

pub use nino_core::model::{NinoMember, NinoType, TypeInfo, TypeKind};
pub use nino_core::registration::{
	ConstructorDescriptor, ConstructorParamDescriptor, MemberDescriptor, TypeDescriptor,
};
pub use nino_core::TypeId;

/// Re-exported so `#[derive(Nino)]` expansions can write
/// `nino::inventory::submit! { ... }` without `nino-derive` itself
/// depending on `inventory` — mirrors the indirection the source system's
/// generator needs to avoid a generated-code-to-host-compiler dependency.
pub use inventory;

#[cfg(feature = "derive")]
pub use nino_derive::Nino;
