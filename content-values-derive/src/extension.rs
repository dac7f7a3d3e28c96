use crate::error::Error;
use crate::expand;
use crate::model::{AbstractMethod, ClassModel};
use crate::property::ColumnProperty;

/// What an extension gets to look at for one struct
pub(crate) struct Context<'a> {
    pub(crate) model: &'a ClassModel,

    /// Abstract methods no earlier extension has consumed
    pub(crate) abstract_methods: &'a [AbstractMethod],
}

/// A generator plugged into the host. Each struct is offered to every
/// registered extension in turn.
pub(crate) trait Extension {
    /// Whether this extension wants to generate anything for the struct
    fn applicable(&self, ctx: &Context<'_>) -> bool;

    /// Abstract methods this extension implements. The host stops
    /// reporting them as unimplemented.
    fn consume_methods<'a>(&self, ctx: &Context<'a>) -> Vec<&'a AbstractMethod>;

    /// Method added to the struct's `impl` block
    fn generate(&self, ctx: &Context<'_>) -> Result<syn::ImplItemFn, Error>;
}

/// Implements the method returning `ContentValues`
pub(crate) struct ContentValuesExtension;

const CONTENT_VALUES: &str = "ContentValues";

impl Extension for ContentValuesExtension {
    fn applicable(&self, ctx: &Context<'_>) -> bool {
        matching_abstract_method(ctx.abstract_methods, CONTENT_VALUES).is_some()
    }

    fn consume_methods<'a>(&self, ctx: &Context<'a>) -> Vec<&'a AbstractMethod> {
        matching_abstract_method(ctx.abstract_methods, CONTENT_VALUES)
            .into_iter()
            .collect()
    }

    fn generate(&self, ctx: &Context<'_>) -> Result<syn::ImplItemFn, Error> {
        let Some(method) = matching_abstract_method(ctx.abstract_methods, CONTENT_VALUES) else {
            return Err(Error::Internal(format!(
                "no method returning {CONTENT_VALUES} left to implement"
            )));
        };

        let properties = ColumnProperty::from_model(ctx.model)?;
        expand::to_content_values_method(method, &properties)
    }
}

/// The one method taking only a receiver and returning `ty`. Returns `None`
/// when no method or more than one method matches.
pub(crate) fn matching_abstract_method<'a>(
    methods: &'a [AbstractMethod],
    ty: &str,
) -> Option<&'a AbstractMethod> {
    let mut matching = methods.iter().filter(|method| is_getter_returning(method, ty));

    match (matching.next(), matching.next()) {
        (Some(method), None) => Some(method),
        _ => None,
    }
}

fn is_getter_returning(method: &AbstractMethod, ty: &str) -> bool {
    let sig = &method.sig;

    if sig.constness.is_some()
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || sig.abi.is_some()
        || sig.variadic.is_some()
    {
        return false;
    }

    // lifetimes are fine, the body never names them
    if sig
        .generics
        .params
        .iter()
        .any(|param| !matches!(param, syn::GenericParam::Lifetime(_)))
    {
        return false;
    }

    let mut inputs = sig.inputs.iter();
    if !matches!(
        (inputs.next(), inputs.next()),
        (Some(syn::FnArg::Receiver(_)), None)
    ) {
        return false;
    }

    match &sig.output {
        syn::ReturnType::Type(_, ret) => match &**ret {
            syn::Type::Path(path) if path.qself.is_none() => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == ty && segment.arguments.is_none()),
            _ => false,
        },
        syn::ReturnType::Default => false,
    }
}
