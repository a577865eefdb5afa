mod attrs;
mod codegen;
mod entity;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `NinoEncode`/`NinoDecode` for a `struct` or `enum`, and
/// registers its metadata with `nino::registry` via `inventory::submit!`.
///
/// Recognised attributes, all under `#[nino(...)]`:
/// - `#[nino(base = "path::to::Base")]` (container, repeatable): records a
///   parent type/trait for polymorphic graph construction.
/// - `#[nino(polymorphic)]` (container): also registers a dispatch-table
///   entry so this concrete type can be encoded/decoded behind `dyn Any`.
/// - `#[nino(skip)]` (field): excluded from the wire format and metadata.
/// - `#[nino(utf8)]` (field): encodes a `String`/`str` member as UTF-8
///   instead of the length-prefixed UTF-16 default.
/// - `#[nino(order = N)]` (field): explicit wire order, ascending.
#[proc_macro_derive(Nino, attributes(nino))]
pub fn derive_nino(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	codegen::derive(input).into()
}
