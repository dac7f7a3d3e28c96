/// Rust types that can be put into `ContentValues` without an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Native {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// `String`, or `&str` when `by_ref`
    Text { by_ref: bool },
    /// `Vec<u8>`, or `&[u8]` when `by_ref`
    Blob { by_ref: bool },
}

impl Native {
    pub(crate) fn from_ty(ty: &syn::Type) -> Option<Native> {
        match ty {
            syn::Type::Group(group) => Native::from_ty(&group.elem),
            syn::Type::Paren(paren) => Native::from_ty(&paren.elem),
            syn::Type::Path(path) if path.qself.is_none() => {
                let segment = path.path.segments.last()?;
                let native = match segment.ident.to_string().as_str() {
                    "bool" => Native::Bool,
                    "i8" => Native::Byte,
                    "i16" => Native::Short,
                    "i32" => Native::Int,
                    "i64" => Native::Long,
                    "f32" => Native::Float,
                    "f64" => Native::Double,
                    "String" => Native::Text { by_ref: false },
                    "Vec" => {
                        return match single_type_argument(segment)? {
                            inner if is_u8(inner) => Some(Native::Blob { by_ref: false }),
                            _ => None,
                        }
                    }
                    _ => return None,
                };
                segment.arguments.is_none().then_some(native)
            }
            syn::Type::Reference(reference) if reference.mutability.is_none() => {
                match &*reference.elem {
                    syn::Type::Path(path) if path.path.is_ident("str") => {
                        Some(Native::Text { by_ref: true })
                    }
                    syn::Type::Slice(slice) if is_u8(&slice.elem) => {
                        Some(Native::Blob { by_ref: true })
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Reference types are `Copy` and get passed by value instead of
    /// borrowed again
    pub(crate) fn by_ref(self) -> bool {
        matches!(
            self,
            Native::Text { by_ref: true } | Native::Blob { by_ref: true }
        )
    }
}

/// Returns `T` for `Option<T>`
pub(crate) fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    match ty {
        syn::Type::Group(group) => option_inner(&group.elem),
        syn::Type::Paren(paren) => option_inner(&paren.elem),
        syn::Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            if segment.ident != "Option" {
                return None;
            }
            single_type_argument(segment)
        }
        _ => None,
    }
}

fn single_type_argument(segment: &syn::PathSegment) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    if args.args.len() != 1 {
        return None;
    }

    match args.args.first()? {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

fn is_u8(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(path) if path.qself.is_none() && path.path.is_ident("u8"))
}
