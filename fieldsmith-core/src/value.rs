//! Structured values handed to the serializer.

use indexmap::IndexMap;

/// An insertion-ordered string-keyed mapping of values.
pub type Map = IndexMap<String, Value>;

/// A structured value describing one piece of a definition.
///
/// Declarations are lowered to this tree before rendering. Mappings keep
/// insertion order so the rendered output follows declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Keyed mapping.
    Map(Map),
}

impl Value {
    /// Create a string value.
    pub fn string(v: impl Into<String>) -> Self {
        Self::Str(v.into())
    }

    /// Create an empty mapping.
    pub fn map() -> Self {
        Self::Map(Map::new())
    }

    /// Create an empty sequence.
    pub fn list() -> Self {
        Self::List(Vec::new())
    }

    /// Borrow the mapping if this is one.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the sequence if this is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the string if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key in a mapping. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Whether this mapping's keys are exactly `"0"`, `"1"`, ... `"n-1"` in order.
    ///
    /// Such a mapping is an ordered sequence in disguise and renders without keys.
    /// Empty mappings are not sequential.
    pub fn is_sequential_map(map: &Map) -> bool {
        !map.is_empty()
            && map
                .keys()
                .enumerate()
                .all(|(i, key)| *key == i.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Map(v)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Str(s),
            toml::Value::Integer(i) => Self::Int(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(dt) => Self::Str(dt.to_string()),
            toml::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Map(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
