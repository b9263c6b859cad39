//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! This macro generates an implementation of the `Filterable` trait (a static
//! table of field descriptors) and field name constants for lookups.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{
    ext::IdentExt, parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, Generics,
    Result,
};

use super::attrs::parse_filter_attrs;
use super::shape::{classify, Shape};

/// Main implementation of the Filterable derive macro.
pub fn filterable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let record_name = struct_name.unraw().to_string();
    let generics = with_static_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Err(Error::new(
                    input.span(),
                    "Filterable can only be derived for structs with named fields",
                ))
            }
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    input.span(),
                    "Filterable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Filterable can only be derived for structs",
            ))
        }
    };

    let mut getters: Vec<TokenStream> = Vec::new();
    let mut descriptors: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut seen_constants: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let filter_attrs = parse_filter_attrs(&field.attrs)?;

        // Skip if marked with #[filter(skip)]
        if filter_attrs.skip {
            continue;
        }

        // Determine the field name used in descriptors
        let query_name = filter_attrs
            .rename
            .unwrap_or_else(|| field_name.unraw().to_string());

        if !seen.insert(query_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate filter field name `{query_name}`"),
            ));
        }

        let const_name = to_screaming_snake_case(&query_name);
        // createdAt and created_at both map to CREATED_AT, the first one keeps it
        if is_const_ident(&const_name) && seen_constants.insert(const_name.clone()) {
            let const_ident = format_ident!("{}", const_name);
            field_constants.push(quote! {
                /// Field name constant for descriptor lookups.
                pub const #const_ident: &'static str = #query_name;
            });
        }

        let ty = &field.ty;
        let shape = if filter_attrs.scalar {
            Shape::Scalar
        } else {
            classify(ty)
        };

        let descriptor = match shape {
            Shape::Scalar => {
                let getter = format_ident!("__exemplar_get_{}", field_name.unraw());
                // Spanned on the field type, so a missing `Scalar` impl points there
                getters.push(quote_spanned! {ty.span()=>
                    #[doc(hidden)]
                    #[allow(non_snake_case)]
                    fn #getter(record: &Self) -> ::exemplar::Value<'_> {
                        <#ty as ::exemplar::Scalar>::to_value(&record.#field_name)
                    }
                });
                quote_spanned! {ty.span()=>
                    ::exemplar::Field::new(
                        #query_name,
                        <#ty as ::exemplar::Scalar>::FIELD_TYPE,
                        Self::#getter,
                    )
                }
            }
            Shape::Composite { name, optional } => {
                opaque_descriptor(&query_name, quote!(Composite), &name, optional)
            }
            Shape::Reference { name, optional } => {
                opaque_descriptor(&query_name, quote!(Reference), &name, optional)
            }
            Shape::Collection { name, optional } => {
                opaque_descriptor(&query_name, quote!(Collection), &name, optional)
            }
        };
        descriptors.push(descriptor);
    }

    // Generate the impl blocks
    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
            #(#getters)*
        }

        impl #impl_generics ::exemplar::Filterable for #struct_name #ty_generics #where_clause {
            const FIELDS: &'static [::exemplar::Field<Self>] = &[
                #(#descriptors),*
            ];

            fn record_name() -> &'static str {
                #record_name
            }
        }
    };

    Ok(expanded)
}

/// Adds a `'static` bound for every type and lifetime parameter, as required
/// by `Filterable`.
fn with_static_bounds(generics: &Generics) -> Generics {
    let mut bounded = generics.clone();
    if generics.params.is_empty() {
        return bounded;
    }
    let where_clause = bounded.make_where_clause();
    for lifetime in generics.lifetimes() {
        let lifetime = &lifetime.lifetime;
        where_clause.predicates.push(parse_quote!(#lifetime: 'static));
    }
    for param in generics.type_params() {
        let ident = &param.ident;
        where_clause.predicates.push(parse_quote!(#ident: 'static));
    }
    bounded
}

/// Descriptor for a field that is listed but never read.
fn opaque_descriptor(
    query_name: &str,
    kind: TokenStream,
    type_name: &str,
    optional: bool,
) -> TokenStream {
    let constructor = if optional {
        quote!(optional)
    } else {
        quote!(new)
    };
    quote! {
        ::exemplar::Field::new(
            #query_name,
            ::exemplar::FieldType::#constructor(::exemplar::TypeKind::#kind(#type_name)),
            ::exemplar::unsupported::<Self>,
        )
    }
}

/// Whether `name` can be emitted as an associated const without clashing
/// with `Filterable::FIELDS`.
fn is_const_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "FIELDS"
        && name != "_"
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> Result<String> {
        filterable_derive_impl(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("created_at"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("createdAt"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("my-field"), "MY_FIELD");
        assert_eq!(to_screaming_snake_case("XMLParser"), "XMLPARSER");
    }

    #[test]
    fn test_const_ident() {
        assert!(is_const_ident("CREATED_AT"));
        assert!(!is_const_ident("FIELDS"));
        assert!(!is_const_ident("9LIVES"));
        assert!(!is_const_ident("A/B"));
    }

    #[test]
    fn test_scalar_field_gets_accessor() {
        let output = expand(syn::parse_quote! {
            struct Person {
                name: String,
                age: Option<u32>,
            }
        })
        .unwrap();
        assert!(output.contains("__exemplar_get_name"));
        assert!(output.contains("__exemplar_get_age"));
        assert!(output.contains("pub const NAME"));
        assert!(output.contains("\"Person\""));
    }

    #[test]
    fn test_collection_field_is_opaque() {
        let output = expand(syn::parse_quote! {
            struct Post {
                title: String,
                tags: Vec<String>,
            }
        })
        .unwrap();
        assert!(output.contains("Collection"));
        assert!(output.contains("\"Vec<String>\""));
        assert!(!output.contains("__exemplar_get_tags"));
    }

    #[test]
    fn test_skip_and_rename() {
        let output = expand(syn::parse_quote! {
            struct Account {
                #[filter(skip)]
                secret: String,
                #[filter(rename = "login")]
                user: String,
            }
        })
        .unwrap();
        assert!(!output.contains("secret"));
        assert!(output.contains("\"login\""));
        assert!(output.contains("pub const LOGIN"));
    }

    #[test]
    fn test_raw_identifier() {
        let output = expand(syn::parse_quote! {
            struct Token {
                r#type: String,
            }
        })
        .unwrap();
        assert!(output.contains("\"type\""));
        assert!(output.contains("__exemplar_get_type"));
    }

    #[test]
    fn test_colliding_constants_emitted_once() {
        let output = expand(syn::parse_quote! {
            struct Event {
                created_at: u64,
                createdAt: u64,
            }
        })
        .unwrap();
        assert_eq!(output.matches("pub const CREATED_AT").count(), 1);
        assert!(output.contains("\"createdAt\""));
    }

    #[test]
    fn test_generic_params_bounded_static() {
        let output = expand(syn::parse_quote! {
            struct Tagged<M> {
                id: u32,
                #[filter(skip)]
                meta: M,
            }
        })
        .unwrap();

        let file = syn::parse_file(&output).unwrap();
        for item in file.items {
            let syn::Item::Impl(item) = item else {
                panic!("expected impl blocks only");
            };
            let where_clause = item.generics.where_clause.expect("where clause");
            let predicates = &where_clause.predicates;
            assert_eq!(predicates.len(), 1);
            assert_eq!(
                quote!(#predicates).to_string(),
                quote!(M: 'static).to_string()
            );
        }
    }

    #[test]
    fn test_fields_constant_not_shadowed() {
        let output = expand(syn::parse_quote! {
            struct Report {
                fields: u32,
            }
        })
        .unwrap();
        assert!(!output.contains("pub const FIELDS"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = expand(syn::parse_quote! {
            struct Clash {
                a: u8,
                #[filter(rename = "a")]
                b: u8,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("duplicate filter field name"));
    }

    #[test]
    fn test_enum_rejected() {
        let err = expand(syn::parse_quote! {
            enum Status { Open, Closed }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn test_tuple_struct_rejected() {
        let err = expand(syn::parse_quote! {
            struct Pair(u8, u8);
        })
        .unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }
}
