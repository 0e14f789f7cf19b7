//! Implementation of the `#[derive(Reflect)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use crate::attrs::{FieldAttrs, TypeAttrs, VisibilityAttr};

pub fn derive_reflect_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_reflect_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_reflect_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Reflect)] does not support generic types",
        ));
    }

    let name = &input.ident;
    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let reflect_name = attrs.name.clone().unwrap_or_else(|| name.to_string());

    let reflect_impl = generate_reflect_impl(name, &reflect_name);
    let members = collect_members(input)?;

    Ok(quote! {
        #reflect_impl

        impl ::reflector_registry::Describe for #name {
            fn describe<'__r, __O: ::reflector_core::Reflect>(
                class: ::reflector_registry::ClassBuilder<'__r, __O, Self>,
            ) -> ::core::result::Result<
                ::reflector_registry::ClassBuilder<'__r, __O, Self>,
                ::reflector_core::RegistrationError,
            > {
                #(let class = class #members?;)*
                ::core::result::Result::Ok(class)
            }
        }
    })
}

fn generate_reflect_impl(name: &syn::Ident, reflect_name: &str) -> TokenStream2 {
    quote! {
        impl ::reflector_core::Reflect for #name {
            fn type_hash() -> ::reflector_core::TypeHash {
                ::reflector_core::TypeHash::from_name(#reflect_name)
            }

            fn type_name() -> &'static str {
                #reflect_name
            }
        }
    }
}

/// One builder call per reflected field, in declaration order.
fn collect_members(input: &DeriveInput) -> syn::Result<Vec<TokenStream2>> {
    let mut members = Vec::new();

    let Data::Struct(data) = &input.data else {
        return Ok(members);
    };
    let Fields::Named(fields) = &data.fields else {
        return Ok(members);
    };

    for field in &fields.named {
        let field_attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;

        if field_attrs.base {
            members.push(quote! {
                .inherit::<#ty>(|s: &Self| &s.#ident, |s: &mut Self| &mut s.#ident)
            });
            continue;
        }

        let member_name = field_attrs.name.unwrap_or_else(|| ident.to_string());
        let visibility = match field_attrs
            .visibility
            .unwrap_or_else(|| VisibilityAttr::from_rust(&field.vis))
        {
            VisibilityAttr::Public => quote! { ::reflector_core::Visibility::Public },
            VisibilityAttr::Protected => quote! { ::reflector_core::Visibility::Protected },
            VisibilityAttr::Private => quote! { ::reflector_core::Visibility::Private },
        };

        members.push(quote! {
            .field::<#ty, _, _>(
                #member_name,
                #visibility,
                |s: &Self| &s.#ident,
                |s: &mut Self| &mut s.#ident,
            )
        });
    }

    Ok(members)
}
