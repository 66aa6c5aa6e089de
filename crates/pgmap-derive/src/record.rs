//! Record derive macro implementation

mod attrs;

use crate::common::syn_types::is_repeated_type;
use attrs::{FieldAttr, Kind};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result, Visibility};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut defs = Vec::new();
    let mut ref_arms = Vec::new();
    let mut mut_arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let attr = FieldAttr::from_field(field)?;
        let public = matches!(field.vis, Visibility::Public(_));
        let ident_str = ident.to_string();
        let tag = match &attr.tag {
            Some(tag) => quote! { ::core::option::Option::Some(#tag) },
            None => quote! { ::core::option::Option::None },
        };

        let kind = attr.kind.unwrap_or(if is_repeated_type(ty) {
            Kind::Repeated
        } else {
            Kind::Scalar
        });

        let (def, variant) = match kind {
            Kind::Scalar => (
                quote! { ::pgmap::FieldDef::scalar(#ident_str, #tag, #public) },
                quote! { Scalar },
            ),
            Kind::Repeated => (
                quote! { ::pgmap::FieldDef::repeated(#ident_str, #tag, #public) },
                quote! { Repeated },
            ),
            Kind::Embedded => (
                quote! {
                    ::pgmap::FieldDef::embedded(
                        #ident_str,
                        #tag,
                        #public,
                        <#ty as ::pgmap::Record>::fields,
                    )
                },
                quote! { Embedded },
            ),
        };
        defs.push(def);

        // Fields that are never mapped get no accessor.
        if public && !attr.is_skip() {
            ref_arms.push(quote! {
                #index => ::core::option::Option::Some(::pgmap::FieldRef::#variant(&self.#ident)),
            });
            mut_arms.push(quote! {
                #index => ::core::option::Option::Some(::pgmap::FieldMut::#variant(&mut self.#ident)),
            });
        }
    }

    Ok(quote! {
        impl ::pgmap::Fields for #name {
            fn field(&self, index: usize) -> ::core::option::Option<::pgmap::FieldRef<'_>> {
                match index {
                    #(#ref_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::pgmap::FieldMut<'_>> {
                match index {
                    #(#mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::pgmap::Record for #name {
            fn fields() -> &'static [::pgmap::FieldDef] {
                const FIELDS: &[::pgmap::FieldDef] = &[#(#defs),*];
                FIELDS
            }
        }
    })
}
