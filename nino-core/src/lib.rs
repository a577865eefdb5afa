//! Pure, `syn`-free pipeline data. This crate holds everything downstream
//! of metadata projection that must stay a deterministic function of its
//! inputs: the DTRs (`model`), the deterministic type-identity hash
//! (`type_id`), the `'static` cross-crate registration records
//! (`registration`), and the graph builder (`graph`, component C3).
//!
//! Nothing here touches a proc-macro's view of the host compiler — that
//! boundary belongs entirely to `nino-derive`.

pub mod graph;
pub mod model;
pub mod registration;
pub mod type_id;

pub use type_id::TypeId;
