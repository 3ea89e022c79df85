use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single keyed record from a JSON collection.
///
/// Field order follows the source document. Records are read-only once
/// built; [`Record::with_field`] returns a modified copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from an already-decoded JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Return the raw JSON value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Return the value for `key` when it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Return scalar text for `key`.
    ///
    /// Strings are trimmed; numbers are rendered in their JSON form. Empty
    /// strings and non-scalar values yield `None`.
    pub fn get_text(&self, key: &str) -> Option<String> {
        let text = match self.fields.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if text.is_empty() {
            return None;
        }
        Some(text)
    }

    /// Truthiness of `key`, or `default` when the key is absent.
    ///
    /// `null`, `false`, zero, and empty strings, arrays, or objects are
    /// false; every other value is true. The string `"false"` is true.
    pub fn is_truthy(&self, key: &str, default: bool) -> bool {
        match self.fields.get(key) {
            None => default,
            Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }

    /// Return the value for `key` when it is an integral JSON number.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }

    /// Shorthand for the `type` field.
    pub fn entry_type(&self) -> Option<&str> {
        self.get_str("type")
    }

    /// Return a copy of this record with `key` set to `value`.
    pub fn with_field(&self, key: &str, value: impl Into<Value>) -> Record {
        let mut fields = self.fields.clone();
        fields.insert(key.to_string(), value.into());
        Record { fields }
    }

    /// Iterate over field names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}
