//! Structural builtin codecs (spec.md "C5"): one generic `NinoEncode`/
//! `NinoDecode` impl per shape instead of a textually emitted pair per
//! instantiation — monomorphization gives every concrete `T` its own
//! compiled copy for free, so there is nothing left for a generator to
//! emit here.

mod collections;
mod nullable;
mod polymorphic;
mod tuple;
mod wrappers;

pub use nullable::Nullable;
pub use polymorphic::Polymorphic;
pub use wrappers::{NinoPriorityQueue, NinoQueue, NinoStack};
