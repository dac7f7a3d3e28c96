use crate::error::ErrorSet;

use syn::parse::{Parse, ParseStream};
use syn::Token;

/// Everything the generator knows about the struct being derived
#[derive(Debug)]
pub(crate) struct ClassModel {
    /// Struct name
    pub(crate) ident: syn::Ident,

    /// Struct generics, carried over to the generated `impl`
    pub(crate) generics: syn::Generics,

    /// Methods the struct declares and expects to be generated
    pub(crate) abstract_methods: Vec<AbstractMethod>,

    /// Named fields in declaration order
    pub(crate) accessors: Vec<Accessor>,
}

/// Method declared through `#[content_values(...)]`, without a body
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AbstractMethod {
    pub(crate) attrs: Vec<syn::Attribute>,
    pub(crate) vis: syn::Visibility,
    pub(crate) sig: syn::Signature,
}

/// A named field and its `#[column(...)]` settings
#[derive(Debug)]
pub(crate) struct Accessor {
    pub(crate) ident: syn::Ident,
    pub(crate) ty: syn::Type,
    pub(crate) column: ColumnAttr,
}

#[derive(Debug, Default)]
pub(crate) struct ColumnAttr {
    /// `#[column(name = "...")]`
    pub(crate) name: Option<syn::LitStr>,

    /// `#[column(adapter = Type)]`
    pub(crate) adapter: Option<syn::Type>,
}

struct AbstractMethods(Vec<AbstractMethod>);

impl ClassModel {
    pub(crate) fn from_ast(input: &syn::DeriveInput) -> syn::Result<Self> {
        let fields = match &input.data {
            syn::Data::Struct(data) => &data.fields,
            syn::Data::Enum(data) => {
                return Err(syn::Error::new_spanned(
                    data.enum_token,
                    "ContentValues can only be derived for structs",
                ))
            }
            syn::Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "ContentValues can only be derived for structs",
                ))
            }
        };

        let mut errs = ErrorSet::new();
        let mut abstract_methods = vec![];
        let mut declared = false;

        for attr in &input.attrs {
            if attr.path().is_ident("content_values") {
                declared = true;
                match attr.parse_args::<AbstractMethods>() {
                    Ok(methods) => abstract_methods.extend(methods.0),
                    Err(err) => errs.push(err),
                }
            }
        }

        if !declared {
            abstract_methods.push(AbstractMethod::default_method());
        }

        let mut accessors = vec![];

        match fields {
            syn::Fields::Named(named) => {
                for field in &named.named {
                    match Accessor::from_ast(field) {
                        Ok(accessor) => accessors.push(accessor),
                        Err(err) => errs.push(err),
                    }
                }
            }
            syn::Fields::Unnamed(unnamed) => errs.push(syn::Error::new_spanned(
                unnamed,
                "ContentValues fields must be named",
            )),
            syn::Fields::Unit => {}
        }

        errs.finish()?;

        Ok(ClassModel {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            abstract_methods,
            accessors,
        })
    }
}

impl AbstractMethod {
    /// Declared when the struct has no `#[content_values(...)]` attribute
    fn default_method() -> Self {
        AbstractMethod {
            attrs: vec![],
            vis: syn::parse_quote!(pub),
            sig: syn::parse_quote!(fn to_content_values(&self) -> ::content_values::ContentValues),
        }
    }

    pub(crate) fn name(&self) -> &syn::Ident {
        &self.sig.ident
    }
}

impl Parse for AbstractMethods {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut methods = vec![];

        while !input.is_empty() {
            let attrs = input.call(syn::Attribute::parse_outer)?;
            let vis = input.parse()?;
            let sig = input.parse()?;
            methods.push(AbstractMethod { attrs, vis, sig });

            if input.is_empty() {
                break;
            }
            input.parse::<Token![;]>()?;
        }

        Ok(AbstractMethods(methods))
    }
}

impl Accessor {
    fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "ContentValues fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column = None;

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                } else {
                    match ColumnAttr::from_ast(attr) {
                        Ok(attr) => column = Some(attr),
                        Err(err) => errs.push(err),
                    }
                }
            }
        }

        errs.finish()?;

        Ok(Accessor {
            ident: ident.clone(),
            ty: field.ty.clone(),
            column: column.unwrap_or_default(),
        })
    }
}

impl ColumnAttr {
    fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut ret = ColumnAttr::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if ret.name.is_some() {
                    return Err(meta.error("duplicate column name"));
                }
                let name: syn::LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new_spanned(&name, "column name can't be empty"));
                }
                ret.name = Some(name);
            } else if meta.path.is_ident("adapter") {
                if ret.adapter.is_some() {
                    return Err(meta.error("duplicate column adapter"));
                }
                ret.adapter = Some(meta.value()?.parse()?);
            } else {
                return Err(syn::Error::new_spanned(
                    &meta.path,
                    "unexpected column attribute, expected `name` or `adapter`",
                ));
            }

            Ok(())
        })?;

        Ok(ret)
    }
}
