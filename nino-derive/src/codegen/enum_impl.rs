//! Closed polymorphism (spec.md §9 "sealed hierarchies"): an `enum` is
//! written as a `u32` variant discriminant followed by that variant's own
//! fields, in declaration order. No dispatch table or trait object is
//! needed — unlike the `#[nino(polymorphic)]` struct path, every possible
//! shape is already known to the match arm the decoder compiles to.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

use crate::attrs::ContainerAttrs;
use crate::codegen::registration::emit_registration_kind;
use crate::entity::extract_fields;

pub fn derive(input: &DeriveInput, data: &DataEnum, container: &ContainerAttrs) -> TokenStream {
	let ident = &input.ident;

	let mut encode_arms = Vec::with_capacity(data.variants.len());
	let mut decode_arms = Vec::with_capacity(data.variants.len());

	for (index, variant) in data.variants.iter().enumerate() {
		let index = index as u32;
		let variant_ident = &variant.ident;
		let fields = extract_fields(&variant.fields);

		match &variant.fields {
			Fields::Unit => {
				encode_arms.push(quote! {
					#ident::#variant_ident => writer.write_unmanaged(&#index),
				});
				decode_arms.push(quote! {
					#index => #ident::#variant_ident,
				});
			}
			Fields::Named(_) => {
				let pattern_names: Vec<_> = fields.iter().map(|f| f.binding.clone()).collect();
				let writes = pattern_names.iter().map(|binding| {
					quote! { ::nino::NinoEncode::encode(#binding, writer); }
				});
				let reads = fields.iter().map(|f| {
					let binding = &f.binding;
					let ty = &f.ty;
					quote! { let #binding = <#ty as ::nino::NinoDecode>::decode(reader)?; }
				});
				encode_arms.push(quote! {
					#ident::#variant_ident { #(#pattern_names),* } => {
						writer.write_unmanaged(&#index);
						#(#writes)*
					}
				});
				decode_arms.push(quote! {
					#index => {
						#(#reads)*
						#ident::#variant_ident { #(#pattern_names),* }
					}
				});
			}
			Fields::Unnamed(original) => {
				if fields.len() != original.unnamed.len() {
					panic!("`#[nino(skip)]` is not supported on tuple variants");
				}
				let mut by_position = fields.iter().collect::<Vec<_>>();
				by_position.sort_by_key(|f| f.decl_index);
				let pattern_names: Vec<_> = by_position.iter().map(|f| f.binding.clone()).collect();
				let writes = pattern_names.iter().map(|binding| {
					quote! { ::nino::NinoEncode::encode(#binding, writer); }
				});
				let reads = by_position.iter().map(|f| {
					let binding = &f.binding;
					let ty = &f.ty;
					quote! { let #binding = <#ty as ::nino::NinoDecode>::decode(reader)?; }
				});
				encode_arms.push(quote! {
					#ident::#variant_ident ( #(#pattern_names),* ) => {
						writer.write_unmanaged(&#index);
						#(#writes)*
					}
				});
				decode_arms.push(quote! {
					#index => {
						#(#reads)*
						#ident::#variant_ident ( #(#pattern_names),* )
					}
				});
			}
		}
	}

	let registration = emit_registration_kind(input, &[], container, quote!(::nino::TypeKind::Enum));

	quote! {
		impl ::nino::NinoEncode for #ident {
			fn encode(&self, writer: &mut ::nino::Writer) {
				match self {
					#(#encode_arms)*
				}
			}
		}

		impl ::nino::NinoDecode for #ident {
			fn decode(reader: &mut ::nino::Reader) -> ::nino::NinoResult<Self> {
				let discriminant: u32 = reader.read_unmanaged()?;
				Ok(match discriminant {
					#(#decode_arms)*
					other => return Err(::nino::NinoError::InvalidPayload(format!(
						"unknown discriminant {other} for enum {}", stringify!(#ident)
					))),
				})
			}
		}

		impl ::nino::Nullable for #ident {}

		#registration
	}
}
