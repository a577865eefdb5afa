//! Parsing for the single `#[nino(...)]` attribute surface, at both the
//! container level (on the `struct`/`enum` item) and the field level.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

#[derive(Default)]
pub struct ContainerAttrs {
	/// `#[nino(base = "path::to::Base")]`, repeatable; depth-first,
	/// base-first declaration order is simply the attribute's own order
	/// (spec.md §9).
	pub bases: Vec<String>,
	/// `#[nino(polymorphic)]`: register a [`crate::registry::DispatchEntry`]
	/// for this type in addition to its `TypeDescriptor`, so it can be
	/// encoded/decoded behind a `dyn Any` (spec.md §9).
	pub polymorphic: bool,
}

#[derive(Default)]
pub struct FieldAttrs {
	/// `#[nino(skip)]`: excluded from both the wire format and the
	/// registered metadata entirely.
	pub skip: bool,
	/// `#[nino(utf8)]`: this `String`/`str` member is written with
	/// [`crate::Writer::write_utf8_string`] instead of the UTF-16 default.
	pub utf8: bool,
	/// `#[nino(order = N)]`: explicit wire order, lower first. Fields
	/// without it keep their declaration order, sorted after every
	/// explicitly ordered field (spec.md §4.2 "declared order unless
	/// explicitly overridden").
	pub order: Option<i64>,
	/// `#[nino(formatter = "path::to::fn")]`: recorded verbatim onto the
	/// member's registered metadata (`NinoMember::custom_formatter`) for a
	/// host to look up and call for display purposes. Purely descriptive —
	/// it never changes this member's own wire encoding.
	pub formatter: Option<String>,
}

pub fn parse_container_attrs(attrs: &[Attribute]) -> ContainerAttrs {
	let mut out = ContainerAttrs::default();
	for attr in attrs {
		if !attr.path().is_ident("nino") {
			continue;
		}
		let Meta::List(list) = &attr.meta else {
			panic!("expected `#[nino(...)]`");
		};
		list
			.parse_nested_meta(|meta| {
				if meta.path.is_ident("polymorphic") {
					out.polymorphic = true;
					return Ok(());
				}
				if meta.path.is_ident("base") {
					let value = meta.value()?;
					let lit: syn::LitStr = value.parse()?;
					out.bases.push(lit.value());
					return Ok(());
				}
				Err(meta.error("unrecognised `nino` container attribute"))
			})
			.unwrap();
	}
	out
}

pub fn parse_field_attrs(attrs: &[Attribute]) -> FieldAttrs {
	let mut out = FieldAttrs::default();
	for attr in attrs {
		if !attr.path().is_ident("nino") {
			continue;
		}
		let Meta::List(list) = &attr.meta else {
			panic!("expected `#[nino(...)]`");
		};
		list
			.parse_nested_meta(|meta| {
				if meta.path.is_ident("skip") {
					out.skip = true;
					return Ok(());
				}
				if meta.path.is_ident("utf8") {
					out.utf8 = true;
					return Ok(());
				}
				if meta.path.is_ident("order") {
					let value = meta.value()?;
					let expr: Expr = value.parse()?;
					let Expr::Lit(ExprLit { lit: Lit::Int(lit), .. }) = expr else {
						panic!("`order` expects an integer literal");
					};
					out.order = Some(lit.base10_parse().unwrap());
					return Ok(());
				}
				if meta.path.is_ident("formatter") {
					let value = meta.value()?;
					let lit: syn::LitStr = value.parse()?;
					out.formatter = Some(lit.value());
					return Ok(());
				}
				Err(meta.error("unrecognised `nino` field attribute"))
			})
			.unwrap();
	}
	out
}
