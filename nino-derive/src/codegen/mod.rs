mod enum_impl;
mod registration;
mod struct_impl;

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput};

use crate::attrs::parse_container_attrs;

/// Generic types and unions are structurally rejected (spec.md §7.1
/// `StructuralReject`): "silent drop, no artifact" means the macro emits
/// no impl and no diagnostic, rather than panicking and aborting the
/// whole crate's build. The annotated item itself is left to compile (or
/// not) on its own; it simply never gains a `NinoEncode`/`NinoDecode`
/// impl, so any attempt to actually serialize it surfaces as an ordinary
/// trait-bound error at the call site, not a macro-expansion failure.
pub fn derive(input: DeriveInput) -> TokenStream {
	if !input.generics.params.is_empty() {
		return TokenStream::new();
	}

	let container = parse_container_attrs(&input.attrs);

	match &input.data {
		Data::Struct(data) => struct_impl::derive(&input, data, &container),
		Data::Enum(data) => enum_impl::derive(&input, data, &container),
		Data::Union(_) => TokenStream::new(),
	}
}
