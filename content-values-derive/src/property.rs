use crate::error::ErrorSet;
use crate::model::{Accessor, ClassModel};
use crate::ty::{self, Native};

use std::collections::HashMap;
use syn::ext::IdentExt;

/// A struct field mapped to one insertion into `ContentValues`
#[derive(Debug)]
pub(crate) struct ColumnProperty {
    /// Field name
    pub(crate) ident: syn::Ident,

    /// Key the value is stored under
    pub(crate) column_name: syn::LitStr,

    /// Declared field type
    pub(crate) ty: syn::Type,

    /// `T` when the field is an `Option<T>`
    pub(crate) optional: Option<syn::Type>,

    /// `#[column(adapter = ...)]`
    pub(crate) adapter: Option<syn::Type>,

    /// Set if the field type, or the optional's inner type, is natively
    /// supported
    pub(crate) native: Option<Native>,
}

impl ColumnProperty {
    /// One property per field, in declaration order. Fails if any field
    /// can't be mapped or two fields share a column name.
    pub(crate) fn from_model(model: &ClassModel) -> syn::Result<Vec<ColumnProperty>> {
        let mut errs = ErrorSet::new();
        let mut properties = Vec::with_capacity(model.accessors.len());
        let mut seen = HashMap::new();

        for accessor in &model.accessors {
            let property = ColumnProperty::from_accessor(accessor);

            if let Some(first) = seen.insert(property.column_name.value(), &accessor.ident) {
                errs.push(syn::Error::new_spanned(
                    &property.column_name,
                    format!(
                        "column name `{}` is already used by property `{first}`",
                        property.column_name.value()
                    ),
                ));
            }

            if property.adapter.is_none() && !property.supported_type() {
                errs.push(syn::Error::new_spanned(
                    &property.ty,
                    format!(
                        "property `{}` has type that can't be put into ContentValues",
                        accessor.ident
                    ),
                ));
            }

            properties.push(property);
        }

        errs.finish()?;
        Ok(properties)
    }

    fn from_accessor(accessor: &Accessor) -> Self {
        let column_name = match &accessor.column.name {
            Some(name) => name.clone(),
            None => syn::LitStr::new(&accessor.ident.unraw().to_string(), accessor.ident.span()),
        };

        let optional = ty::option_inner(&accessor.ty).cloned();
        let native = Native::from_ty(optional.as_ref().unwrap_or(&accessor.ty));

        ColumnProperty {
            ident: accessor.ident.clone(),
            column_name,
            ty: accessor.ty.clone(),
            optional,
            adapter: accessor.column.adapter.clone(),
            native,
        }
    }

    pub(crate) fn is_optional(&self) -> bool {
        self.optional.is_some()
    }

    pub(crate) fn supported_type(&self) -> bool {
        self.native.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quote::ToTokens;

    fn properties(input: syn::DeriveInput) -> syn::Result<Vec<ColumnProperty>> {
        let model = ClassModel::from_ast(&input)?;
        ColumnProperty::from_model(&model)
    }

    #[test]
    fn derives_column_metadata() {
        let properties = properties(syn::parse_quote! {
            struct User {
                #[column(adapter = PhotoAdapter)]
                photo: Vec<u8>,
                #[column(name = "full_name")]
                name: String,
                age: Option<i32>,
                r#type: i64,
            }
        })
        .unwrap();

        let keys: Vec<_> = properties.iter().map(|p| p.column_name.value()).collect();
        assert_eq!(keys, ["photo", "full_name", "age", "type"]);

        let photo = &properties[0];
        assert_eq!(
            photo.adapter.as_ref().unwrap().to_token_stream().to_string(),
            "PhotoAdapter"
        );
        assert_eq!(photo.native, Some(Native::Blob { by_ref: false }));

        let age = &properties[2];
        assert!(age.is_optional());
        assert_eq!(age.native, Some(Native::Int));
        assert_eq!(age.optional.as_ref().unwrap().to_token_stream().to_string(), "i32");

        assert!(!properties[1].is_optional());
    }

    #[test]
    fn adapter_covers_unsupported_types() {
        let properties = properties(syn::parse_quote! {
            struct Event {
                #[column(adapter = TimestampAdapter)]
                at: std::time::SystemTime,
                #[column(adapter = TagsAdapter)]
                tags: Option<Vec<String>>,
            }
        })
        .unwrap();

        assert!(!properties[0].supported_type());
        assert!(properties[1].is_optional());
        assert!(!properties[1].supported_type());
    }

    #[test]
    fn reports_each_unsupported_property() {
        let err = properties(syn::parse_quote! {
            struct Event {
                id: i64,
                count: usize,
                tags: Option<Vec<String>>,
            }
        })
        .unwrap_err();

        let messages: Vec<_> = err.into_iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            [
                "property `count` has type that can't be put into ContentValues",
                "property `tags` has type that can't be put into ContentValues",
            ]
        );
    }

    #[test]
    fn reports_duplicate_column_names() {
        let err = properties(syn::parse_quote! {
            struct User {
                name: String,
                #[column(name = "name")]
                nickname: String,
            }
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "column name `name` is already used by property `name`"
        );
    }
}
