extern crate proc_macro;

mod error;
mod expand;
mod extension;
mod host;
mod model;
mod property;
mod ty;

use extension::{ContentValuesExtension, Extension};
use model::ClassModel;
use proc_macro2::TokenStream;

/// Registered extensions, offered each derived struct in this order
const EXTENSIONS: &[&dyn Extension] = &[&ContentValuesExtension];

fn generate(input: TokenStream) -> syn::Result<TokenStream> {
    let input: syn::DeriveInput = syn::parse2(input)?;
    let model = ClassModel::from_ast(&input)?;

    host::run(&model, EXTENSIONS)
}

/// Generate a method converting the struct into `ContentValues`
///
/// # General usage
///
/// ## Struct configuration
/// ```ignore
/// #[derive(ContentValues)]
/// #[content_values(
///     // Methods the struct expects to be generated, one signature per
///     // method, separated by `;`. Exactly one of them has to take only
///     // `self` and return `ContentValues`; that one is implemented.
///     //
///     // Without the attribute the struct declares
///     // `pub fn to_content_values(&self) -> ContentValues`
///     pub fn to_values(&self) -> ContentValues;
/// )]
/// ```
///
/// Every other declared method is reported as unimplemented. A struct with
/// two matching methods gets neither.
///
/// ## Field configuration
///
/// ```ignore
/// #[column(
///     // Key the field is stored under. Defaults to the field name
///     name = "my_column",
///
///     // Type implementing `ColumnTypeAdapter<FieldType>` and `Default`.
///     // Fields naming the same type share one adapter
///     adapter = my::Adapter,
/// )]
/// ```
///
/// Fields without an adapter must be `bool`, `i8`, `i16`, `i32`, `i64`,
/// `f32`, `f64`, `String`, `Vec<u8>`, `&str`, `&[u8]`, or an `Option` of
/// one of them. `None` is stored as `Value::Null`.
///
/// # Basic example
/// ```ignore
/// use content_values::{ContentValues, ColumnTypeAdapter};
///
/// #[derive(ContentValues)]
/// pub struct User {
///     #[column(adapter = PhotoAdapter)]
///     pub photo: Vec<u8>,
///     pub name: String,
///     #[column(name = "age_years")]
///     pub age: Option<i32>,
/// }
/// ```
/// That generates the following
/// ```ignore
/// impl User {
///     pub fn to_content_values(&self) -> ::content_values::ContentValues {
///         let mut values = ::content_values::ContentValues::with_capacity(3usize);
///         let adapter_0 = <PhotoAdapter as ::core::default::Default>::default();
///         ::content_values::ColumnTypeAdapter::to_content_values(
///             &adapter_0,
///             &mut values,
///             "photo",
///             &self.photo,
///         );
///         values.put("name", &self.name);
///         {
///             let value = &self.age;
///             match value {
///                 ::core::option::Option::Some(value) => values.put("age_years", value),
///                 ::core::option::Option::None => values.put_null("age_years"),
///             }
///         }
///         values
///     }
/// }
/// ```
///
#[proc_macro_derive(ContentValues, attributes(content_values, column))]
pub fn content_values(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    match generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
