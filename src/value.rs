// Wed Aug 05 2026 - Alex

use crate::engine::FunctionRef;
use indexmap::IndexMap;
use std::fmt;

/// Engine-neutral value vocabulary for globals transferred between a
/// sandbox and a context.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ScriptValue>),
    Table(IndexMap<String, ScriptValue>),
    Function(FunctionRef),
}

impl ScriptValue {
    pub fn string(s: impl Into<String>) -> Self {
        ScriptValue::String(s.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, ScriptValue::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScriptValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScriptValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ScriptValue::Float(n) => Some(*n),
            ScriptValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ScriptValue>> {
        match self {
            ScriptValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&IndexMap<String, ScriptValue>> {
        match self {
            ScriptValue::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Nil => "nil",
            ScriptValue::Boolean(_) => "boolean",
            ScriptValue::Integer(_) => "integer",
            ScriptValue::Float(_) => "float",
            ScriptValue::String(_) => "string",
            ScriptValue::Array(_) => "array",
            ScriptValue::Table(_) => "table",
            ScriptValue::Function(_) => "function",
        }
    }

    /// JSON rendering used by trace snapshots and the CLI. Function values
    /// have no JSON shape and render as a placeholder string.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ScriptValue::Nil => serde_json::Value::Null,
            ScriptValue::Boolean(b) => serde_json::Value::Bool(*b),
            ScriptValue::Integer(n) => serde_json::Value::from(*n),
            ScriptValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ScriptValue::String(s) => serde_json::Value::String(s.clone()),
            ScriptValue::Array(a) => {
                serde_json::Value::Array(a.iter().map(|v| v.to_json()).collect())
            }
            ScriptValue::Table(t) => {
                let mut map = serde_json::Map::new();
                for (k, v) in t {
                    map.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(map)
            }
            ScriptValue::Function(f) => serde_json::Value::String(format!("<function {}>", f.raw())),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ScriptValue::Nil,
            serde_json::Value::Bool(b) => ScriptValue::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ScriptValue::Integer(i)
                } else {
                    ScriptValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => ScriptValue::String(s.clone()),
            serde_json::Value::Array(a) => {
                ScriptValue::Array(a.iter().map(ScriptValue::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let mut table = IndexMap::new();
                for (k, v) in map {
                    table.insert(k.clone(), ScriptValue::from_json(v));
                }
                ScriptValue::Table(table)
            }
        }
    }
}

impl Default for ScriptValue {
    fn default() -> Self {
        ScriptValue::Nil
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Nil => write!(f, "nil"),
            ScriptValue::Boolean(b) => write!(f, "{}", b),
            ScriptValue::Integer(n) => write!(f, "{}", n),
            ScriptValue::Float(n) => write!(f, "{}", n),
            ScriptValue::String(s) => write!(f, "{}", s),
            ScriptValue::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            ScriptValue::Table(t) => {
                write!(f, "{{")?;
                for (i, (k, v)) in t.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            ScriptValue::Function(r) => write!(f, "<function {}>", r.raw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(ScriptValue::Integer(42).as_int(), Some(42));
        assert_eq!(ScriptValue::Integer(42).as_float(), Some(42.0));
        assert_eq!(ScriptValue::string("hi").as_str(), Some("hi"));
        assert!(ScriptValue::Nil.is_nil());
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::json!({"a": 1, "b": [true, "x"], "c": null});
        let value = ScriptValue::from_json(&json);
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn test_float_json_keeps_fraction() {
        let value = ScriptValue::from_json(&serde_json::json!(1.5));
        assert_eq!(value, ScriptValue::Float(1.5));
    }

    #[test]
    fn test_display() {
        let value = ScriptValue::Array(vec![ScriptValue::Integer(1), ScriptValue::string("x")]);
        assert_eq!(value.to_string(), "[1, x]");
    }
}
