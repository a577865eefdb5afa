//! Registration glue emission: the `TypeDescriptor`/`DispatchEntry`
//! `inventory::submit!` calls that let `nino::registry` rebuild this type's
//! metadata and, for polymorphic types, its dispatch slot the first time
//! the graph is touched anywhere in the linked binary (spec.md §6
//! "Generated registration entrypoint").

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::attrs::ContainerAttrs;
use crate::entity::FieldEntity;

pub fn emit_registration(
	input: &DeriveInput,
	fields: &[FieldEntity],
	container: &ContainerAttrs,
) -> TokenStream {
	emit_registration_kind(input, fields, container, quote!(::nino::TypeKind::Struct))
}

pub fn emit_registration_kind(
	input: &DeriveInput,
	fields: &[FieldEntity],
	container: &ContainerAttrs,
	kind: TokenStream,
) -> TokenStream {
	let ident = &input.ident;
	let type_id_const = format_ident!("__NINO_TYPE_ID_{}", ident);
	let descriptor_const = format_ident!("__NINO_TYPE_DESCRIPTOR_{}", ident);
	let members_const = format_ident!("__NINO_MEMBERS_{}", ident);
	let ctor_params_const = format_ident!("__NINO_CTOR_PARAMS_{}", ident);
	let ctors_const = format_ident!("__NINO_CTORS_{}", ident);
	let parents_const = format_ident!("__NINO_PARENTS_{}", ident);

	let member_entries = fields.iter().map(|f| {
		let name = f.binding.to_string();
		let type_fqn = f.type_fqn();
		let is_private = !f.is_public;
		let is_utf8_string = f.attrs.utf8;
		let is_unmanaged = f.is_unmanaged_primitive();
		let custom_formatter = match &f.attrs.formatter {
			Some(path) => quote!(Some(#path)),
			None => quote!(None),
		};
		quote! {
			::nino::MemberDescriptor {
				name: #name,
				type_fqn: #type_fqn,
				is_private: #is_private,
				is_utf8_string: #is_utf8_string,
				is_unmanaged: #is_unmanaged,
				custom_formatter: #custom_formatter,
			}
		}
	});

	let ctor_param_entries = fields.iter().map(|f| {
		let name = f.binding.to_string();
		let type_fqn = f.type_fqn();
		quote! {
			::nino::ConstructorParamDescriptor {
				name: #name,
				type_fqn: #type_fqn,
			}
		}
	});

	let parent_literals = container.bases.iter();
	let is_polymorphic = container.polymorphic;

	let dispatch_submission = container.polymorphic.then(|| {
		quote! {
			::nino::inventory::submit! {
				::nino::registry::dispatch_entry::<#ident>(#type_id_const)
			}
		}
	});

	quote! {
		#[doc(hidden)]
		const #type_id_const: u32 = {
			const FQN: &str = concat!(module_path!(), "::", stringify!(#ident));
			::nino::TypeId::of_fqn(FQN).raw()
		};

		#[doc(hidden)]
		static #members_const: &[::nino::MemberDescriptor] = &[#(#member_entries),*];

		#[doc(hidden)]
		static #ctor_params_const: &[::nino::ConstructorParamDescriptor] = &[#(#ctor_param_entries),*];

		#[doc(hidden)]
		static #ctors_const: &[::nino::ConstructorDescriptor] = &[
			::nino::ConstructorDescriptor {
				params: #ctor_params_const,
				has_explicit_ordering: true,
			},
		];

		#[doc(hidden)]
		static #parents_const: &[&str] = &[#(#parent_literals),*];

		#[doc(hidden)]
		static #descriptor_const: ::nino::TypeDescriptor = ::nino::TypeDescriptor {
			fqn: concat!(module_path!(), "::", stringify!(#ident)),
			type_id: #type_id_const,
			kind: #kind,
			is_sealed: true,
			is_polymorphic: #is_polymorphic,
			parents: #parents_const,
			members: #members_const,
			constructors: #ctors_const,
		};

		::nino::inventory::submit! { #descriptor_const }

		#dispatch_submission
	}
}
