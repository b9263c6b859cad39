//! Attribute parsing for the Filterable derive macro.
//!
//! This module provides the parser for the `#[filter(...)]` field attributes
//! used by the `Filterable` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterAttr {
    /// Leave this field out of the field table.
    pub skip: bool,
    /// Describe the field through its `Scalar` impl, whatever its syntax.
    pub scalar: bool,
    /// Custom field name (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FilterAttr {
    fn default() -> Self {
        FilterAttr {
            skip: false,
            scalar: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl FilterAttr {
    fn merge(&mut self, other: FilterAttr) {
        self.skip |= other.skip;
        self.scalar |= other.scalar;
        if other.rename.is_some() {
            self.rename = other.rename;
        }
        self.span = other.span;
    }
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr {
            span: input.span(),
            ..FilterAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Flags: filter(skip), filter(scalar)
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("scalar") {
                        attr.scalar = true;
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "unknown filter flag. Expected: skip or scalar",
                        ));
                    }
                }

                // rename = "custom_name"
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        if let syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) = &nv.value
                        {
                            if s.value().is_empty() {
                                return Err(Error::new(s.span(), "rename must not be empty"));
                            }
                            attr.rename = Some(s.value());
                        } else {
                            return Err(Error::new(
                                nv.value.span(),
                                "rename must be a string literal",
                            ));
                        }
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected: skip, scalar, or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Collect `#[filter(...)]` attributes from a field's attributes.
///
/// Several `#[filter]` attributes on one field are merged, later ones win.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<FilterAttr> {
    let mut merged = FilterAttr::default();
    for attr in attrs {
        if attr.path().is_ident("filter") {
            merged.merge(attr.parse_args::<FilterAttr>()?);
        }
    }
    if merged.skip && merged.scalar {
        return Err(Error::new(merged.span, "skip and scalar can't be combined"));
    }
    Ok(merged)
}
