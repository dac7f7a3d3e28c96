use proc_macro2::Span;

/// Failure of one extension while generating code for a struct
#[derive(Debug)]
pub(crate) enum Error {
    /// Problem in the user's code, reported at its source location
    Diagnostic(syn::Error),

    /// Broken assumption inside the generator itself
    Internal(String),
}

impl Error {
    pub(crate) fn into_syn(self) -> syn::Error {
        match self {
            Error::Diagnostic(err) => err,
            Error::Internal(msg) => {
                syn::Error::new(Span::call_site(), format!("internal error: {msg}"))
            }
        }
    }
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Self {
        Error::Diagnostic(err)
    }
}

#[derive(Debug)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self { errors: vec![] }
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    fn collect(self) -> Option<syn::Error> {
        self.errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
    }

    /// `Ok(())` if nothing was pushed, else every error combined
    pub(crate) fn finish(self) -> syn::Result<()> {
        match self.collect() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
