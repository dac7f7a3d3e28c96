use indexmap::IndexMap;
use std::fmt;

use crate::{Error, FromValue, Value};

/// Insertion-ordered map of column names to [`Value`]s
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentValues {
    values: IndexMap<String, Value>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` is a hint only, the map grows past it as needed
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    /// Stores `value` under `key`. A key that is already present keeps its
    /// position and gets the new value.
    pub fn put<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.values.insert(key.to_owned(), value.into());
    }

    pub fn put_null(&mut self, key: &str) {
        self.values.insert(key.to_owned(), Value::Null);
    }

    pub fn put_all(&mut self, other: &ContentValues) {
        for (key, value) in other.iter() {
            self.values.insert(key.to_owned(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Reads `key` as `T`. Missing keys and mismatched variants are errors;
    /// use `Option<T>` to accept a stored null.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T, Error> {
        let value = self
            .get(key)
            .ok_or_else(|| Error(format!("no value stored for {key:?}")))?;

        T::from_value(value).map_err(|err| Error(format!("{key:?}: {}", err.0)))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl fmt::Display for ContentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={value}", snailquote::escape(key))?;
        }
        Ok(())
    }
}

impl IntoIterator for ContentValues {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContentValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_insertion_order() {
        let mut values = ContentValues::with_capacity(1);
        values.put("b", 2i32);
        values.put("a", "one");
        values.put_null("c");

        assert_eq!(values.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn capacity_is_a_hint() {
        let mut values = ContentValues::with_capacity(4);
        assert!(values.capacity() >= 4);
        assert!(values.is_empty());

        for i in 0..10i32 {
            values.put(&format!("k{i}"), i);
        }

        assert_eq!(values.len(), 10);
        assert!(values.capacity() >= 10);
        assert_eq!(values.get("k9"), Some(&Value::Int(9)));
    }

    #[test]
    fn reput_replaces_in_place() {
        let mut values = ContentValues::new();
        values.put("a", 1i64);
        values.put("b", 2i64);
        values.put("a", 3i64);

        assert_eq!(
            values.iter().collect::<Vec<_>>(),
            [("a", &Value::Long(3)), ("b", &Value::Long(2))]
        );
    }

    #[test]
    fn get_as_errors() {
        let values: ContentValues = [("age", Value::Int(7)), ("nick", Value::Null)]
            .into_iter()
            .collect();

        assert_eq!(values.get_as::<i32>("age").unwrap(), 7);
        assert_eq!(values.get_as::<Option<String>>("nick").unwrap(), None);
        assert_eq!(
            values.get_as::<String>("age").unwrap_err().0,
            "\"age\": expected String, found int value"
        );
        assert_eq!(
            values.get_as::<i32>("missing").unwrap_err().0,
            "no value stored for \"missing\""
        );
    }

    #[test]
    fn put_all_and_remove() {
        let mut values = ContentValues::new();
        values.put("a", true);

        let mut other = ContentValues::new();
        other.put("b", 1.5f64);
        other.put("a", false);

        values.put_all(&other);
        assert_eq!(values.get("a"), Some(&Value::Bool(false)));
        assert_eq!(values.remove("a"), Some(Value::Bool(false)));
        assert!(!values.contains_key("a"));
        assert_eq!(values.keys().collect::<Vec<_>>(), ["b"]);

        values.clear();
        assert!(values.is_empty());
    }

    #[test]
    fn display_lists_pairs() {
        let mut values = ContentValues::new();
        values.put("name", "Ada Lovelace");
        values.put("age", 36i32);
        values.put_null("photo");

        assert_eq!(values.to_string(), "name='Ada Lovelace' age=36 photo=null");
    }
}
