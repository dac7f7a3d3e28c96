//! Generates conversions of plain structs into [`ContentValues`], an
//! insertion-ordered key-value container.
//!
//! # Example problem
//!
//! Let's assume that we've got this struct
//! ```ignore
//! struct User {
//!     name: String,
//!     /// Age in years, if known
//!     age: Option<i32>,
//!     /// Encoded image
//!     photo: Vec<u8>,
//! }
//! ```
//!
//! and every time it is stored we need a `ContentValues` with one entry per
//! field. Writing `values.put("name", &self.name)` by hand for every field of
//! every struct is repetitive and easy to get out of sync. With the derive
//! the method body is generated:
//!
//! ```
//! use content_values::{ColumnTypeAdapter, ContentValues, Value};
//!
//! #[derive(Default)]
//! struct LengthAdapter;
//!
//! impl ColumnTypeAdapter<Vec<u8>> for LengthAdapter {
//!     fn to_content_values(&self, values: &mut ContentValues, column_name: &str, value: &Vec<u8>) {
//!         values.put(column_name, format!("{} bytes", value.len()));
//!     }
//! }
//!
//! #[derive(content_values::ContentValues)]
//! struct User {
//!     name: String,
//!     #[column(name = "age_years")]
//!     age: Option<i32>,
//!     #[column(adapter = LengthAdapter)]
//!     photo: Vec<u8>,
//! }
//!
//! let user = User { name: "Ada".into(), age: None, photo: vec![0; 3] };
//! let values = user.to_content_values();
//!
//! assert_eq!(values.get("name"), Some(&Value::Text("Ada".into())));
//! assert_eq!(values.get("age_years"), Some(&Value::Null));
//! assert_eq!(values.get("photo"), Some(&Value::Text("3 bytes".into())));
//! ```
//!
//! # Macros documentation
//! See [`ContentValues`](derive@ContentValues) for detailed info
//!
//! # Comparsion to similar libraries
//!
//! ## serde
//!
//! `serde` serializes whole object graphs into a data format. `content_values`
//! only flattens the fields of one struct into a single map of column values
//! and does not support nested structures. Anything else has to go through a
//! [`ColumnTypeAdapter`].
//!
mod value;
mod values;

pub use content_values_derive::ContentValues;
pub use value::{FromValue, Value};
pub use values::ContentValues;

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error(pub String);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Custom conversion of a field that can't be put into [`ContentValues`]
/// directly, or that needs a different representation.
///
/// Selected per field with `#[column(adapter = MyAdapter)]`. The generated
/// method creates one adapter per distinct adapter type with
/// [`Default::default`] and shares it between all fields naming that type.
pub trait ColumnTypeAdapter<T: ?Sized> {
    fn to_content_values(&self, values: &mut ContentValues, column_name: &str, value: &T);
}
