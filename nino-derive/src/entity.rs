//! Entity extraction (C2): turns the `syn::DeriveInput` for one item into
//! the ordered, attribute-resolved field list every codegen stage walks.
//! Extraction only ever sees the annotated item itself — there is no
//! whole-compilation metadata a proc-macro invocation can reach, which is
//! why `parent_ids` resolution and fast-path grouping across types both
//! moved to `nino::registry` (spec.md §9).

use proc_macro2::{Ident, Span};
use quote::quote;
use syn::{Field, Fields, Member, Type};

use crate::attrs::{parse_field_attrs, FieldAttrs};

pub struct FieldEntity {
	/// Syntax used to reach this field on `self`/a constructed value:
	/// `self.name` for named fields, `self.0` for tuple fields.
	pub access: Member,
	/// Pattern-binding identifier used when destructuring a field during
	/// decode, always a valid Rust identifier even for tuple fields.
	pub binding: Ident,
	pub ty: Type,
	pub attrs: FieldAttrs,
	pub is_public: bool,
	pub decl_index: usize,
}

impl FieldEntity {
	fn from_field(index: usize, field: &Field) -> Self {
		let attrs = parse_field_attrs(&field.attrs);
		let (access, binding) = match &field.ident {
			Some(ident) => (Member::Named(ident.clone()), ident.clone()),
			None => (
				Member::Unnamed(index.into()),
				Ident::new(&format!("field_{index}"), Span::call_site()),
			),
		};
		FieldEntity {
			access,
			binding,
			ty: field.ty.clone(),
			attrs,
			is_public: matches!(field.vis, syn::Visibility::Public(_)),
			decl_index: index,
		}
	}

	/// Best-effort textual type description for the registered metadata —
	/// never parsed back, only surfaced through `nino::TypeDescriptor` for
	/// diagnostics and graph display names (spec.md §3 "FQN approximation").
	pub fn type_fqn(&self) -> String {
		let ty = &self.ty;
		quote!(#ty).to_string()
	}

	pub fn is_unmanaged_primitive(&self) -> bool {
		const UNMANAGED: &[&str] = &[
			"u8", "u16", "u32", "u64", "u128", "i8", "i16", "i32", "i64", "i128", "f32", "f64",
			"usize", "isize",
		];
		matches!(&self.ty, Type::Path(p) if p.path.get_ident().is_some_and(|id| UNMANAGED.contains(&id.to_string().as_str())))
	}
}

/// Extracts and orders the wire-visible fields of `fields`, dropping
/// `#[nino(skip)]` members entirely. Fields with an explicit
/// `#[nino(order = N)]` sort before unordered ones, ascending by `N`;
/// unordered fields keep declaration order among themselves, appended
/// after (spec.md §4.2).
pub fn extract_fields(fields: &Fields) -> Vec<FieldEntity> {
	let mut entities: Vec<FieldEntity> = fields
		.iter()
		.enumerate()
		.map(|(i, f)| FieldEntity::from_field(i, f))
		.filter(|f| !f.attrs.skip)
		.collect();

	entities.sort_by_key(|f| (f.attrs.order.is_none(), f.attrs.order.unwrap_or(0), f.decl_index));
	entities
}
