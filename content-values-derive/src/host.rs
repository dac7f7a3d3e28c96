use crate::error::ErrorSet;
use crate::extension::{Context, Extension};
use crate::model::ClassModel;

use proc_macro2::TokenStream;
use quote::quote;

/// Offers the struct to every extension, then reports abstract methods
/// nobody implemented. Any error means nothing is emitted for the struct.
pub(crate) fn run(model: &ClassModel, extensions: &[&dyn Extension]) -> syn::Result<TokenStream> {
    let mut errs = ErrorSet::new();
    let mut remaining = model.abstract_methods.clone();
    let mut methods = vec![];

    for extension in extensions {
        let ctx = Context {
            model,
            abstract_methods: &remaining,
        };

        if !extension.applicable(&ctx) {
            continue;
        }

        let consumed: Vec<_> = extension
            .consume_methods(&ctx)
            .into_iter()
            .cloned()
            .collect();

        match extension.generate(&ctx) {
            Ok(method) => methods.push(method),
            Err(err) => errs.push(err.into_syn()),
        }

        remaining.retain(|method| !consumed.contains(method));
    }

    for method in &remaining {
        errs.push(syn::Error::new_spanned(
            &method.sig,
            format!("no extension implements abstract method `{}`", method.name()),
        ));
    }

    errs.finish()?;

    if methods.is_empty() {
        return Ok(TokenStream::new());
    }

    let ident = &model.ident;
    let (impl_generics, ty_generics, where_clause) = model.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::extension::ContentValuesExtension;
    use crate::model::AbstractMethod;
    use pretty_assertions::assert_eq;

    /// Implements `fn describe(&self) -> String` for testing the host
    struct DescribeExtension;

    impl Extension for DescribeExtension {
        fn applicable(&self, ctx: &Context<'_>) -> bool {
            ctx.abstract_methods.iter().any(|m| m.name() == "describe")
        }

        fn consume_methods<'a>(&self, ctx: &Context<'a>) -> Vec<&'a AbstractMethod> {
            ctx.abstract_methods
                .iter()
                .filter(|m| m.name() == "describe")
                .collect()
        }

        fn generate(&self, ctx: &Context<'_>) -> Result<syn::ImplItemFn, Error> {
            let name = ctx.model.ident.to_string();
            Ok(syn::parse_quote! {
                fn describe(&self) -> String {
                    #name.to_string()
                }
            })
        }
    }

    fn run_with(
        input: syn::DeriveInput,
        extensions: &[&dyn Extension],
    ) -> syn::Result<TokenStream> {
        let model = ClassModel::from_ast(&input)?;
        run(&model, extensions)
    }

    fn messages(err: syn::Error) -> Vec<String> {
        err.into_iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn wraps_methods_in_one_impl_block() {
        let output = run_with(
            syn::parse_quote! {
                #[content_values(fn describe(&self) -> String; fn values(&self) -> ContentValues)]
                struct User<'a, T: Clone> where T: Default {
                    name: &'a str,
                    #[column(adapter = TAdapter)]
                    extra: T,
                }
            },
            &[&ContentValuesExtension, &DescribeExtension],
        )
        .unwrap();

        let item: syn::ItemImpl = syn::parse2(output).unwrap();
        assert!(item.trait_.is_none());
        assert_eq!(item.generics.params.len(), 2);
        assert!(item.generics.where_clause.is_some());

        let names: Vec<_> = item
            .items
            .iter()
            .map(|item| match item {
                syn::ImplItem::Fn(method) => method.sig.ident.to_string(),
                _ => panic!("unexpected impl item"),
            })
            .collect();
        assert_eq!(names, ["values", "describe"]);
    }

    #[test]
    fn reports_unimplemented_methods() {
        let err = run_with(
            syn::parse_quote! {
                #[content_values(fn describe(&self) -> String; fn values(&self) -> ContentValues)]
                struct User {
                    name: String,
                }
            },
            &[&ContentValuesExtension],
        )
        .unwrap_err();

        assert_eq!(
            messages(err),
            ["no extension implements abstract method `describe`"]
        );
    }

    #[test]
    fn ambiguous_target_is_left_unimplemented() {
        let err = run_with(
            syn::parse_quote! {
                #[content_values(fn a(&self) -> ContentValues; fn b(&self) -> ContentValues)]
                struct User {
                    name: String,
                }
            },
            &[&ContentValuesExtension],
        )
        .unwrap_err();

        assert_eq!(
            messages(err),
            [
                "no extension implements abstract method `a`",
                "no extension implements abstract method `b`",
            ]
        );
    }

    #[test]
    fn generation_failure_emits_nothing() {
        let err = run_with(
            syn::parse_quote! {
                #[content_values(fn describe(&self) -> String; fn values(&self) -> ContentValues)]
                struct User {
                    id: u64,
                }
            },
            &[&ContentValuesExtension, &DescribeExtension],
        )
        .unwrap_err();

        assert_eq!(
            messages(err),
            ["property `id` has type that can't be put into ContentValues"]
        );
    }

    #[test]
    fn nothing_declared_nothing_generated() {
        let output = run_with(
            syn::parse_quote! {
                #[content_values()]
                struct User {
                    id: u64,
                }
            },
            &[&ContentValuesExtension],
        )
        .unwrap();

        assert!(output.is_empty());
    }
}
