//! Scalar attribute values and condition signatures
//!
//! Values are compared exactly: no type coercion, so the number `1` and
//! the string `"1"` are different values.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A scalar attribute value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// JSON number
    Number(Number),
    /// String value
    Text(String),
}

impl AttrValue {
    /// Convert a JSON value into a scalar.
    ///
    /// Returns None for null, booleans, arrays and objects.
    pub fn from_json(value: &Value, trim_text: bool) -> Option<Self> {
        match value {
            Value::Number(n) => Some(AttrValue::Number(n.clone())),
            Value::String(s) if trim_text => Some(AttrValue::Text(s.trim().to_string())),
            Value::String(s) => Some(AttrValue::Text(s.clone())),
            _ => None,
        }
    }

    /// Shorthand for a text value
    pub fn text(s: impl Into<String>) -> Self {
        AttrValue::Text(s.into())
    }

    /// Shorthand for an integer value
    pub fn int(n: i64) -> Self {
        AttrValue::Number(Number::from(n))
    }

    /// JSON form of the value; unlike `Display`, `1` and `"1"` stay apart
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Number(n) => Value::Number(n.clone()),
            AttrValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numbers sort before strings; numbers numerically, strings lexicographically.
impl Ord for AttrValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AttrValue::Number(a), AttrValue::Number(b)) => compare_numbers(a, b),
            (AttrValue::Number(_), AttrValue::Text(_)) => Ordering::Less,
            (AttrValue::Text(_), AttrValue::Number(_)) => Ordering::Greater,
            (AttrValue::Text(a), AttrValue::Text(b)) => a.cmp(b),
        }
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    // 1 and 1.0 are distinct values; keep the order total
    x.total_cmp(&y)
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

/// An object's condition-attribute values, keyed by attribute name.
///
/// Two signatures are equal only if they carry the same attribute names
/// with equal values. An attribute absent from one side is a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(BTreeMap<String, AttrValue>);

impl Signature {
    /// Create an empty signature
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute value
    pub fn insert(&mut self, attribute: impl Into<String>, value: AttrValue) {
        self.0.insert(attribute.into(), value);
    }

    /// Look up an attribute value
    pub fn get(&self, attribute: &str) -> Option<&AttrValue> {
        self.0.get(attribute)
    }

    /// Number of attributes present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no attribute is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }

    /// Attribute names in order
    pub fn attributes(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, AttrValue> {
        &self.0
    }

    /// Compact JSON rendering, e.g. `{"a":1,"b":"x"}`.
    ///
    /// Used as the synthetic equivalence class key. Distinct signatures
    /// always render to distinct keys.
    pub fn key(&self) -> String {
        let map: serde_json::Map<String, Value> = self
            .0
            .iter()
            .map(|(attr, value)| (attr.clone(), value.to_json()))
            .collect();
        Value::Object(map).to_string()
    }
}

impl FromIterator<(String, AttrValue)> for Signature {
    fn from_iter<I: IntoIterator<Item = (String, AttrValue)>>(iter: I) -> Self {
        Signature(iter.into_iter().collect())
    }
}
