//! Attribute parsing for the Record derive macro.
//!
//! Handles field-level `#[sql(...)]` attributes.

use syn::{LitStr, Result};

/// How a field is exposed.
///
/// `Scalar` on a `Vec<T>` only compiles when `T` is `u8` behind an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind {
    Scalar,
    Repeated,
    Embedded,
}

/// Parsed `#[sql("tag", embed | repeated | scalar)]`.
#[derive(Debug, Default)]
pub(super) struct FieldAttr {
    pub tag: Option<String>,
    pub kind: Option<Kind>,
}

impl FieldAttr {
    /// Merge every `#[sql(...)]` attribute on a field.
    pub fn from_field(field: &syn::Field) -> Result<Self> {
        let mut out = FieldAttr::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("sql") {
                continue;
            }
            let parsed: FieldAttr = attr.parse_args()?;
            if parsed.tag.is_some() {
                out.tag = parsed.tag;
            }
            if let Some(kind) = parsed.kind {
                set_kind(&mut out.kind, kind, attr)?;
            }
        }
        Ok(out)
    }

    pub fn is_skip(&self) -> bool {
        self.tag.as_deref() == Some("-")
    }
}

fn set_kind(slot: &mut Option<Kind>, kind: Kind, span: impl quote::ToTokens) -> Result<()> {
    match *slot {
        Some(existing) if existing != kind => Err(syn::Error::new_spanned(
            span,
            "conflicting field kinds: use only one of `embed`, `repeated`, `scalar`",
        )),
        _ => {
            *slot = Some(kind);
            Ok(())
        }
    }
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut out = FieldAttr::default();

        loop {
            if input.is_empty() {
                break;
            }

            if input.peek(LitStr) {
                let lit: LitStr = input.parse()?;
                check_tag(&lit.value()).map_err(|msg| syn::Error::new(lit.span(), msg))?;
                out.tag = Some(lit.value());
            } else {
                let ident: syn::Ident = input.parse()?;
                let kind = if ident == "embed" {
                    Kind::Embedded
                } else if ident == "repeated" {
                    Kind::Repeated
                } else if ident == "scalar" {
                    Kind::Scalar
                } else {
                    return Err(syn::Error::new(
                        ident.span(),
                        "expected a tag string, `embed`, `repeated` or `scalar`",
                    ));
                };
                set_kind(&mut out.kind, kind, &ident)?;
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens in #[sql(...)]"));
        }
        Ok(out)
    }
}

/// Compile-time check of the tag grammar: `name`, `name/context,...` or `-`.
fn check_tag(tag: &str) -> std::result::Result<(), String> {
    if tag == "-" {
        return Ok(());
    }
    let mut parts = tag.split('/');
    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Err("empty column name".to_string());
    }
    if name == "-" {
        return Err("'-' excludes every context and takes no context list".to_string());
    }
    for part in parts.flat_map(|p| p.split(',')) {
        let part = part.trim();
        if part.is_empty() {
            return Err("empty context name".to_string());
        }
        let known = ["insert", "update", "select"]
            .iter()
            .any(|c| c.eq_ignore_ascii_case(part));
        if !known {
            return Err(format!(
                "unknown context '{part}', expected insert, update or select"
            ));
        }
    }
    Ok(())
}
