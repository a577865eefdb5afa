use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields};

use crate::attrs::ContainerAttrs;
use crate::codegen::registration::emit_registration;
use crate::entity::{extract_fields, FieldEntity};

pub fn derive(input: &DeriveInput, data: &DataStruct, container: &ContainerAttrs) -> TokenStream {
	let ident = &input.ident;
	let fields = extract_fields(&data.fields);

	let encode_plain = encode_fields_plain(&fields);
	let encode_weak = encode_fields_weak(&fields);
	let decode_plain = decode_fields_plain(&fields);
	let decode_weak = decode_fields_weak(&fields);
	let construct = construct_value(ident, &data.fields, &fields);

	let registration = emit_registration(input, &fields, container);

	quote! {
		#[cfg(not(feature = "weak-version-tolerance"))]
		impl ::nino::NinoEncode for #ident {
			fn encode(&self, writer: &mut ::nino::Writer) {
				#encode_plain
			}
		}

		#[cfg(feature = "weak-version-tolerance")]
		impl ::nino::NinoEncode for #ident {
			fn encode(&self, writer: &mut ::nino::Writer) {
				#encode_weak
			}
		}

		#[cfg(not(feature = "weak-version-tolerance"))]
		impl ::nino::NinoDecode for #ident {
			fn decode(reader: &mut ::nino::Reader) -> ::nino::NinoResult<Self> {
				#decode_plain
				Ok(#construct)
			}
		}

		#[cfg(feature = "weak-version-tolerance")]
		impl ::nino::NinoDecode for #ident {
			fn decode(reader: &mut ::nino::Reader) -> ::nino::NinoResult<Self> {
				#decode_weak
				Ok(#construct)
			}
		}

		impl ::nino::Nullable for #ident {}

		#registration
	}
}

fn encode_fields_plain(fields: &[FieldEntity]) -> TokenStream {
	let writes = fields.iter().map(|f| {
		let access = &f.access;
		if f.attrs.utf8 {
			quote! { writer.write_utf8_string(&self.#access); }
		} else {
			quote! { ::nino::NinoEncode::encode(&self.#access, writer); }
		}
	});
	quote! { #(#writes)* }
}

fn decode_fields_plain(fields: &[FieldEntity]) -> TokenStream {
	let reads = fields.iter().map(|f| {
		let binding = &f.binding;
		let ty = &f.ty;
		if f.attrs.utf8 {
			quote! { let #binding = reader.read_utf8_string()?; }
		} else {
			quote! { let #binding = <#ty as ::nino::NinoDecode>::decode(reader)?; }
		}
	});
	quote! { #(#reads)* }
}

/// Every managed member write is wrapped in a reserve/write/back-patch
/// frame (spec.md §4.4.1), so an older reader that doesn't recognize a
/// trailing member can skip straight past it via the frame's own length.
fn encode_fields_weak(fields: &[FieldEntity]) -> TokenStream {
	let writes = fields.iter().map(|f| {
		let access = &f.access;
		let write_stmt = if f.attrs.utf8 {
			quote! { writer.write_utf8_string(&self.#access); }
		} else {
			quote! { ::nino::NinoEncode::encode(&self.#access, writer); }
		};
		quote! {
			{
				let __nino_frame = writer.reserve_frame();
				#write_stmt
				writer.back_patch_frame(__nino_frame);
			}
		}
	});
	quote! { #(#writes)* }
}

/// Read-side counterpart of [`encode_fields_weak`]: a member missing
/// entirely because the payload ran out (an older writer) decodes as
/// `Default::default()` (spec.md §4.4.2); a member present but shorter or
/// longer than this reader expects is skipped past using its own frame
/// length rather than the reader's assumed shape (spec.md §8).
fn decode_fields_weak(fields: &[FieldEntity]) -> TokenStream {
	let reads = fields.iter().map(|f| {
		let binding = &f.binding;
		let ty = &f.ty;
		let read_expr = if f.attrs.utf8 {
			quote! { reader.read_utf8_string()? }
		} else {
			quote! { <#ty as ::nino::NinoDecode>::decode(reader)? }
		};
		quote! {
			let #binding: #ty = if reader.eof() {
				::std::default::Default::default()
			} else {
				let __nino_frame_len = reader.read_frame_len()? as usize;
				let __nino_start = reader.position();
				let __nino_value: #ty = #read_expr;
				let __nino_consumed = reader.position() - __nino_start;
				if __nino_consumed < __nino_frame_len {
					reader.skip(__nino_frame_len - __nino_consumed)?;
				}
				__nino_value
			};
		}
	});
	quote! { #(#reads)* }
}

fn construct_value(ident: &syn::Ident, shape: &Fields, fields: &[FieldEntity]) -> TokenStream {
	match shape {
		Fields::Named(_) => {
			let names = fields.iter().map(|f| &f.binding);
			quote! { #ident { #(#names),* } }
		}
		Fields::Unnamed(original) => {
			if fields.len() != original.unnamed.len() {
				panic!("`#[nino(skip)]` is not supported on tuple structs: every positional field must be present to construct the value on decode");
			}
			let mut by_position = fields.iter().collect::<Vec<_>>();
			by_position.sort_by_key(|f| f.decl_index);
			let names = by_position.iter().map(|f| &f.binding);
			quote! { #ident ( #(#names),* ) }
		}
		Fields::Unit => quote! { #ident },
	}
}
