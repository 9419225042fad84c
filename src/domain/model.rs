use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reference to an extension entry-point type, by its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One marker attribute instance declared on a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerAttribute {
    pub kind: String,
    pub target: TypeRef,
}

impl MarkerAttribute {
    pub fn new(kind: impl Into<String>, target: impl Into<TypeRef>) -> Self {
        Self {
            kind: kind.into(),
            target: target.into(),
        }
    }
}

/// A "service X was resolved" record. Only `name` is interpreted by the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResolutionEvent {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
    pub resolved_at: DateTime<Utc>,
}

impl ServiceResolutionEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
            resolved_at: Utc::now(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}
