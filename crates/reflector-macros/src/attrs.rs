//! Attribute parsing for `#[reflect(...)]`.

use syn::{Attribute, LitStr, Visibility as RustVisibility};

/// Parsed `#[reflect(...)]` attributes on a type.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Override name (default: Rust type name)
    pub name: Option<String>,
}

/// Member visibility as registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityAttr {
    Public,
    Protected,
    Private,
}

impl VisibilityAttr {
    /// `pub` is public, `pub(..)` is protected, everything else private.
    pub fn from_rust(vis: &RustVisibility) -> Self {
        match vis {
            RustVisibility::Public(_) => VisibilityAttr::Public,
            RustVisibility::Restricted(_) => VisibilityAttr::Protected,
            RustVisibility::Inherited => VisibilityAttr::Private,
        }
    }

    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "public" => Ok(VisibilityAttr::Public),
            "protected" => Ok(VisibilityAttr::Protected),
            "private" => Ok(VisibilityAttr::Private),
            other => Err(syn::Error::new(
                value.span(),
                format!("unknown visibility '{other}', expected \"public\", \"protected\" or \"private\""),
            )),
        }
    }
}

/// Parsed `#[reflect(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Leave the field out of the description
    pub skip: bool,
    /// Flatten the field's type as a base
    pub base: bool,
    /// Override member name
    pub name: Option<String>,
    /// Override visibility
    pub visibility: Option<VisibilityAttr>,
}

impl TypeAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else {
                    return Err(meta.error(format!(
                        "unknown reflect attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("base") {
                    result.base = true;
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("visibility") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.visibility = Some(VisibilityAttr::parse(&value)?);
                } else {
                    return Err(meta.error(format!(
                        "unknown reflect field attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        if result.skip && result.base {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "a field cannot be both `skip` and `base`",
            ));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn type_name_override() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect(name = "Hero")])];
        let parsed = TypeAttrs::from_attrs(&attrs).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Hero"));
    }

    #[test]
    fn foreign_attributes_ignored() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "hello"]), parse_quote!(#[allow(dead_code)])];
        let parsed = FieldAttrs::from_attrs(&attrs).unwrap();
        assert!(!parsed.skip);
        assert!(parsed.name.is_none());
    }

    #[test]
    fn field_flags_combine() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect(name = "hp", visibility = "protected")])];
        let parsed = FieldAttrs::from_attrs(&attrs).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("hp"));
        assert_eq!(parsed.visibility, Some(VisibilityAttr::Protected));
    }

    #[test]
    fn unknown_visibility_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect(visibility = "friend")])];
        assert!(FieldAttrs::from_attrs(&attrs).is_err());
    }

    #[test]
    fn skip_and_base_conflict() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[reflect(skip, base)])];
        assert!(FieldAttrs::from_attrs(&attrs).is_err());
    }

    #[test]
    fn rust_visibility_defaults() {
        let public: RustVisibility = parse_quote!(pub);
        let crate_only: RustVisibility = parse_quote!(pub(crate));
        assert_eq!(VisibilityAttr::from_rust(&public), VisibilityAttr::Public);
        assert_eq!(VisibilityAttr::from_rust(&crate_only), VisibilityAttr::Protected);
        assert_eq!(VisibilityAttr::from_rust(&RustVisibility::Inherited), VisibilityAttr::Private);
    }
}
