// Wed Aug 05 2026 - Alex

use crate::engine::FunctionRef;
use crate::value::ScriptValue;
use indexmap::IndexMap;

/// Data or accessor shape of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Data {
        value: ScriptValue,
        writable: bool,
    },
    Accessor {
        get: Option<FunctionRef>,
        set: Option<FunctionRef>,
    },
}

/// Full metadata for one property. Transfers between sandbox and context
/// carry descriptors verbatim, never bare values.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub kind: PropertyKind,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// Plain writable, enumerable, configurable data property.
    pub fn data(value: ScriptValue) -> Self {
        PropertyDescriptor {
            kind: PropertyKind::Data {
                value,
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    pub fn read_only(value: ScriptValue) -> Self {
        PropertyDescriptor {
            kind: PropertyKind::Data {
                value,
                writable: false,
            },
            enumerable: true,
            configurable: true,
        }
    }

    pub fn accessor(get: Option<FunctionRef>, set: Option<FunctionRef>) -> Self {
        PropertyDescriptor {
            kind: PropertyKind::Accessor { get, set },
            enumerable: true,
            configurable: true,
        }
    }

    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    pub fn is_data(&self) -> bool {
        matches!(self.kind, PropertyKind::Data { .. })
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.kind, PropertyKind::Accessor { .. })
    }

    /// The data value, if this is a data property.
    pub fn value(&self) -> Option<&ScriptValue> {
        match &self.kind {
            PropertyKind::Data { value, .. } => Some(value),
            PropertyKind::Accessor { .. } => None,
        }
    }
}

/// Plain caller-owned property bag used to seed a context and read its
/// globals back. Holds own properties only, in insertion order, including
/// non-enumerable ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sandbox {
    properties: IndexMap<String, PropertyDescriptor>,
}

impl Sandbox {
    pub fn new() -> Self {
        Sandbox {
            properties: IndexMap::new(),
        }
    }

    /// Set a plain data property with default flags.
    pub fn set(&mut self, name: &str, value: ScriptValue) {
        self.define(name, PropertyDescriptor::data(value));
    }

    /// Define a property with an explicit descriptor, replacing any
    /// existing one of the same name.
    pub fn define(&mut self, name: &str, descriptor: PropertyDescriptor) {
        self.properties.insert(name.to_string(), descriptor);
    }

    /// Data value of a property, if present and data-shaped.
    pub fn get(&self, name: &str) -> Option<&ScriptValue> {
        self.properties.get(name).and_then(|d| d.value())
    }

    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyDescriptor> {
        self.properties.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Own property names in insertion order, non-enumerable included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Build a sandbox of plain data properties from a JSON object. Any
    /// other JSON shape yields an empty sandbox.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut sandbox = Sandbox::new();
        if let serde_json::Value::Object(map) = value {
            for (name, v) in map {
                sandbox.set(name, ScriptValue::from_json(v));
            }
        }
        sandbox
    }

    /// JSON object of the enumerable data properties, the shape a
    /// stringify of the sandbox would show.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, descriptor) in &self.properties {
            if !descriptor.enumerable {
                continue;
            }
            if let Some(value) = descriptor.value() {
                map.insert(name.clone(), value.to_json());
            }
        }
        serde_json::Value::Object(map)
    }
}
