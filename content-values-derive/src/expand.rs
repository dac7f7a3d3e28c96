use crate::error::Error;
use crate::model::AbstractMethod;
use crate::property::ColumnProperty;
use crate::ty::Native;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use std::collections::HashMap;

/// Implements `method` by putting every property into a fresh
/// `ContentValues`, in declaration order.
pub(crate) fn to_content_values_method(
    method: &AbstractMethod,
    properties: &[ColumnProperty],
) -> Result<syn::ImplItemFn, Error> {
    let values = syn::Ident::new("values", Span::mixed_site());
    let adapters = AdapterBindings::new(properties);

    let insertions = properties
        .iter()
        .map(|property| Insertion::new(&values, property, &adapters))
        .collect::<Result<Vec<_>, _>>()?;

    let capacity = properties.len();
    let mutability = (!properties.is_empty()).then(|| quote!(mut));
    let AbstractMethod { attrs, vis, sig } = method;

    syn::parse2(quote! {
        #(#attrs)*
        #vis #sig {
            let #mutability #values = ::content_values::ContentValues::with_capacity(#capacity);
            #adapters
            #(#insertions)*
            #values
        }
    })
    .map_err(|err| Error::Internal(format!("generated method doesn't parse: {err}")))
}

/// One adapter instance per distinct adapter type, shared by every property
/// naming that type
struct AdapterBindings<'a> {
    bindings: Vec<(&'a syn::Type, syn::Ident)>,

    /// Adapter type tokens to index into `bindings`
    by_type: HashMap<String, usize>,
}

impl<'a> AdapterBindings<'a> {
    fn new(properties: &'a [ColumnProperty]) -> Self {
        let mut ret = AdapterBindings {
            bindings: vec![],
            by_type: HashMap::new(),
        };

        for adapter in properties.iter().filter_map(|p| p.adapter.as_ref()) {
            let key = adapter.to_token_stream().to_string();
            if !ret.by_type.contains_key(&key) {
                let ident = format_ident!(
                    "adapter_{}",
                    ret.bindings.len(),
                    span = Span::mixed_site()
                );
                ret.by_type.insert(key, ret.bindings.len());
                ret.bindings.push((adapter, ident));
            }
        }

        ret
    }

    fn get(&self, adapter: &syn::Type) -> Option<&syn::Ident> {
        let index = self.by_type.get(&adapter.to_token_stream().to_string())?;
        Some(&self.bindings[*index].1)
    }
}

impl ToTokens for AdapterBindings<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        for (ty, ident) in &self.bindings {
            tokens.extend(quote! {
                let #ident = <#ty as ::core::default::Default>::default();
            });
        }
    }
}

/// How a single property ends up in the container
#[derive(Debug, PartialEq)]
enum Strategy<'a> {
    /// Handed to the adapter bound to this ident
    Adapter(&'a syn::Ident),

    /// `Some` puts the inner value, `None` puts null
    Optional(Native),

    /// Put as is
    Direct(Native),
}

impl<'a> Strategy<'a> {
    fn select(property: &ColumnProperty, adapters: &'a AdapterBindings<'_>) -> Option<Self> {
        if let Some(adapter) = &property.adapter {
            return adapters.get(adapter).map(Strategy::Adapter);
        }

        let native = property.native?;
        if property.is_optional() {
            Some(Strategy::Optional(native))
        } else {
            Some(Strategy::Direct(native))
        }
    }
}

struct Insertion<'a> {
    values: &'a syn::Ident,
    property: &'a ColumnProperty,
    strategy: Strategy<'a>,
}

impl<'a> Insertion<'a> {
    fn new(
        values: &'a syn::Ident,
        property: &'a ColumnProperty,
        adapters: &'a AdapterBindings<'_>,
    ) -> Result<Self, Error> {
        let Some(strategy) = Strategy::select(property, adapters) else {
            return Err(Error::Internal(format!(
                "property `{}` reached code generation without a way to store it",
                property.ident
            )));
        };

        Ok(Insertion {
            values,
            property,
            strategy,
        })
    }
}

impl ToTokens for Insertion<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let values = self.values;
        let field = &self.property.ident;
        let key = &self.property.column_name;

        tokens.extend(match &self.strategy {
            Strategy::Adapter(adapter) => quote! {
                ::content_values::ColumnTypeAdapter::to_content_values(
                    &#adapter,
                    &mut #values,
                    #key,
                    &self.#field,
                );
            },
            Strategy::Optional(native) => {
                let value = syn::Ident::new("value", Span::mixed_site());
                let deref = native.by_ref().then(|| quote!(*));
                quote! {
                    {
                        let #value = &self.#field;
                        match #value {
                            ::core::option::Option::Some(#value) => #values.put(#key, #deref #value),
                            ::core::option::Option::None => #values.put_null(#key),
                        }
                    }
                }
            }
            Strategy::Direct(native) => {
                let borrow = (!native.by_ref()).then(|| quote!(&));
                quote! {
                    #values.put(#key, #borrow self.#field);
                }
            }
        });
    }
}
