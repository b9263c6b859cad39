//! Syntactic classification of field types.
//!
//! A derive macro only sees tokens, so the shape of a field's type is read
//! off its path: known primitive, text and decimal names are scalars, known
//! container names are collections or references, and every other path is a
//! composite stored inline.

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, TypePath};

const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32",
    "f64",
];

const TEXT: &[&str] = &["String", "str"];

const COLLECTIONS: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "BinaryHeap",
    "HashMap",
    "HashSet",
    "BTreeMap",
    "BTreeSet",
];

const POINTERS: &[&str] = &["Box", "Rc", "Arc", "Weak"];

/// How a field type is described in the generated field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Read through the type's `Scalar` impl.
    Scalar,
    /// Stored inline but not directly comparable.
    Composite { name: String, optional: bool },
    /// Pointer to another value.
    Reference { name: String, optional: bool },
    /// Sequence, set or map.
    Collection { name: String, optional: bool },
}

impl Shape {
    fn into_optional(self) -> Shape {
        match self {
            Shape::Scalar => Shape::Scalar,
            Shape::Composite { name, .. } => Shape::Composite {
                name,
                optional: true,
            },
            Shape::Reference { name, .. } => Shape::Reference {
                name,
                optional: true,
            },
            Shape::Collection { name, .. } => Shape::Collection {
                name,
                optional: true,
            },
        }
    }
}

/// Classifies a declared field type.
///
/// `Option<V>` of an inline value `V` is read through `Scalar`, composites
/// included, so the inner type has to implement it. A nested `Option` is not
/// a value type and is reported as a reference.
pub fn classify(ty: &Type) -> Shape {
    match ty {
        Type::Paren(inner) => classify(&inner.elem),
        Type::Group(inner) => classify(&inner.elem),
        Type::Reference(reference) => {
            if is_text(&reference.elem) {
                Shape::Scalar
            } else {
                Shape::Reference {
                    name: type_name(ty),
                    optional: false,
                }
            }
        }
        Type::Array(_) | Type::Slice(_) => Shape::Collection {
            name: type_name(ty),
            optional: false,
        },
        Type::Path(path) => classify_path(path, ty),
        _ => Shape::Composite {
            name: type_name(ty),
            optional: false,
        },
    }
}

fn classify_path(path: &TypePath, ty: &Type) -> Shape {
    let Some(last) = path.path.segments.last() else {
        return Shape::Composite {
            name: type_name(ty),
            optional: false,
        };
    };
    let ident = last.ident.to_string();

    let bare = path.qself.is_none() && path.path.segments.len() == 1;
    if bare && PRIMITIVES.contains(&ident.as_str()) {
        return Shape::Scalar;
    }
    if TEXT.contains(&ident.as_str()) || ident == "Decimal" {
        return Shape::Scalar;
    }
    if ident == "Option" {
        return match single_type_argument(&last.arguments) {
            Some(inner) if is_option(inner) => Shape::Reference {
                name: type_name(inner),
                optional: true,
            },
            Some(inner) => match classify(inner) {
                Shape::Composite { .. } => Shape::Scalar,
                other => other.into_optional(),
            },
            None => Shape::Composite {
                name: type_name(ty),
                optional: false,
            },
        };
    }
    if COLLECTIONS.contains(&ident.as_str()) {
        return Shape::Collection {
            name: type_name(ty),
            optional: false,
        };
    }
    if POINTERS.contains(&ident.as_str()) {
        return Shape::Reference {
            name: type_name(ty),
            optional: false,
        };
    }
    Shape::Composite {
        name: type_name(ty),
        optional: false,
    }
}

fn is_text(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| TEXT.contains(&segment.ident.to_string().as_str())),
        _ => false,
    }
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

fn single_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None,
    }
}

/// Renders a type the way it reads in source, without token spacing.
pub fn type_name(ty: &Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.peek().copied();
            let glued = matches!(prev, Some('<' | '&' | ':' | '(' | '[') | None)
                || matches!(next, Some('<' | '>' | ',' | ':' | ')' | ']' | ';') | None);
            if !glued {
                out.push(c);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(src: &str) -> Shape {
        classify(&syn::parse_str::<Type>(src).unwrap())
    }

    #[test]
    fn primitives_and_text_are_scalar() {
        for src in ["u8", "i64", "f32", "bool", "char", "String", "&str", "&'static str"] {
            assert_eq!(shape(src), Shape::Scalar, "{src}");
        }
        assert_eq!(shape("rust_decimal::Decimal"), Shape::Scalar);
        assert_eq!(shape("std::string::String"), Shape::Scalar);
    }

    #[test]
    fn optional_values_are_scalar() {
        assert_eq!(shape("Option<u32>"), Shape::Scalar);
        assert_eq!(shape("Option<String>"), Shape::Scalar);
        assert_eq!(shape("std::option::Option<Status>"), Shape::Scalar);
    }

    #[test]
    fn optional_non_values_keep_their_kind() {
        assert_eq!(
            shape("Option<Vec<u8>>"),
            Shape::Collection {
                name: "Vec<u8>".to_string(),
                optional: true
            }
        );
        assert_eq!(
            shape("Option<Box<Node>>"),
            Shape::Reference {
                name: "Box<Node>".to_string(),
                optional: true
            }
        );
    }

    #[test]
    fn nested_option_is_not_a_value() {
        assert_eq!(
            shape("Option<Option<u8>>"),
            Shape::Reference {
                name: "Option<u8>".to_string(),
                optional: true
            }
        );
    }

    #[test]
    fn containers() {
        assert_eq!(
            shape("Vec<String>"),
            Shape::Collection {
                name: "Vec<String>".to_string(),
                optional: false
            }
        );
        assert_eq!(
            shape("HashMap<String, u32>"),
            Shape::Collection {
                name: "HashMap<String, u32>".to_string(),
                optional: false
            }
        );
        assert_eq!(
            shape("[u8; 4]"),
            Shape::Collection {
                name: "[u8; 4]".to_string(),
                optional: false
            }
        );
        assert_eq!(
            shape("Arc<Config>"),
            Shape::Reference {
                name: "Arc<Config>".to_string(),
                optional: false
            }
        );
    }

    #[test]
    fn other_paths_are_composite() {
        assert_eq!(
            shape("Address"),
            Shape::Composite {
                name: "Address".to_string(),
                optional: false
            }
        );
        assert_eq!(
            shape("(u8, u8)"),
            Shape::Composite {
                name: "(u8, u8)".to_string(),
                optional: false
            }
        );
    }

    #[test]
    fn type_name_spacing() {
        let name = |src: &str| type_name(&syn::parse_str::<Type>(src).unwrap());
        assert_eq!(name("Vec < String >"), "Vec<String>");
        assert_eq!(
            name("std::collections::BTreeMap<u8, Vec<u8>>"),
            "std::collections::BTreeMap<u8, Vec<u8>>"
        );
        assert_eq!(name("&'static Node"), "&'static Node");
    }
}
