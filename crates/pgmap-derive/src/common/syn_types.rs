//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Vec<T>, or return None if not a Vec type.
///
/// Recognizes `Vec<T>` and `std::vec::Vec<T>`.
pub fn vec_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Vec" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Whether a field of this type aggregates values by default: any `Vec<T>` except
/// `Vec<u8>`, which is a single bytea value.
pub fn is_repeated_type(ty: &syn::Type) -> bool {
    match vec_inner(ty) {
        Some(syn::Type::Path(inner)) => !inner.path.is_ident("u8"),
        Some(_) => true,
        None => false,
    }
}
