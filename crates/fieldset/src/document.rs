// File: src/document.rs
// Purpose: Opaque form handle trait and the in-memory multi-valued form data

use std::collections::BTreeMap;

/// A live form, seen only through its named fields.
///
/// The engine never owns or parses the form representation; it enumerates
/// field names and reads string values. A DOM-backed embedder implements
/// this over its own document handle.
pub trait FormDocument {
    /// Field names in document order.
    fn field_names(&self) -> Vec<String>;

    /// Current value of a named field, if the field exists.
    fn value(&self, name: &str) -> Option<String>;

    /// Whether the document has a field with this name.
    fn has_field(&self, name: &str) -> bool {
        self.value(name).is_some()
    }
}

/// Multi-valued form data with typed accessors.
///
/// The default in-memory [`FormDocument`]: each field holds an ordered list
/// of string values and field enumeration is stable (sorted by name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to a field, creating the field if absent.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Replaces a field's values with a single value.
    pub fn put_single(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), vec![value.into()]);
        self
    }

    /// First value of a field, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a field, if any.
    pub fn strings(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// First value trimmed, or the empty string when the field is absent.
    pub fn safe_string(&self, name: &str) -> String {
        self.first(name).map(str::trim).unwrap_or("").to_string()
    }

    /// First value parsed as a boolean.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.first(name).and_then(|v| v.parse().ok())
    }

    pub fn boolean_or(&self, name: &str, default: bool) -> bool {
        self.boolean(name).unwrap_or(default)
    }

    /// First value parsed as an integer.
    pub fn long(&self, name: &str) -> Option<i64> {
        self.first(name).and_then(|v| v.parse().ok())
    }

    pub fn long_or(&self, name: &str, default: i64) -> i64 {
        self.long(name).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FormDocument for FormData {
    fn field_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn value(&self, name: &str) -> Option<String> {
        self.first(name).map(str::to_string)
    }

    fn has_field(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (name, value) in iter {
            data.add(name, value);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_valued_fields() {
        let mut data = FormData::new();
        data.add("tags", "a").add("tags", "b");

        assert_eq!(data.first("tags"), Some("a"));
        assert_eq!(data.strings("tags").unwrap().len(), 2);

        data.put_single("tags", "c");
        assert_eq!(data.strings("tags").unwrap(), ["c".to_string()]);
    }

    #[test]
    fn test_typed_accessors() {
        let data: FormData = [("age", "42"), ("active", "true"), ("name", "  ed  ")]
            .into_iter()
            .collect();

        assert_eq!(data.long("age"), Some(42));
        assert_eq!(data.long("name"), None);
        assert_eq!(data.long_or("missing", 7), 7);
        assert_eq!(data.boolean("active"), Some(true));
        assert!(!data.boolean_or("missing", false));
        assert_eq!(data.safe_string("name"), "ed");
        assert_eq!(data.safe_string("missing"), "");
    }

    #[test]
    fn test_document_view() {
        let data: FormData = [("b", "2"), ("a", "1")].into_iter().collect();

        assert_eq!(data.field_names(), ["a", "b"]);
        assert_eq!(data.value("a").as_deref(), Some("1"));
        assert!(data.has_field("b"));
        assert!(!data.has_field("c"));
    }

    #[test]
    fn test_empty_field_has_no_first_value() {
        let data = FormData::new();
        assert_eq!(data.first("anything"), None);
        assert!(data.is_empty());
    }
}
