//! Schema fragment parsing and the schema error taxonomy.
//!
//! A schema document is a recursively nested fragment: a `name`, an optional
//! ordered list of leaf `properties`, and an optional ordered list of
//! `subwidgets` (mutually exclusive child branches). Documents are accepted
//! in JSON or TOML form; TOML input is converted through a
//! [`serde_json::Value`] so both formats share one deserialization path.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing a schema or operating on the built tree.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is not well-formed.
    #[error("malformed schema document: {reason}")]
    Parse { reason: String },

    /// A property references a field kind absent from the registry.
    ///
    /// Raised during tree construction; the whole load is aborted and no
    /// partial tree is installed.
    #[error("unknown field kind `{kind}` for property `{path}`")]
    UnknownFieldKind { path: String, kind: String },

    /// A selection referenced a name not present among a node's children.
    ///
    /// The rejected call leaves the active selection unchanged.
    #[error("no branch named `{name}` under `{path}`")]
    UnknownChild { path: String, name: String },
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::Parse {
            reason: err.to_string(),
        }
    }
}

/// One leaf field declaration: a field name plus its registered kind tag.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertySpec {
    /// Field name, used as label and in aggregation order.
    pub name: String,
    /// Field kind tag, resolved against the registry at build time.
    #[serde(rename = "field")]
    pub kind: String,
}

/// A recursively nested schema fragment.
///
/// Every member is optional in the wire format. An absent `name` becomes the
/// empty string; an unnamed passthrough branch is legal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaNode {
    /// Branch name shown in selectors and emitted during aggregation.
    #[serde(default)]
    pub name: String,
    /// Leaf fields attached to this node, in schema order.
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    /// Mutually exclusive child branches, in schema order.
    #[serde(default)]
    pub subwidgets: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Deserialize a fragment from an in-memory JSON value.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Parse a JSON schema document.
    pub fn from_json(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML schema document.
    pub fn from_toml(content: &str) -> Result<Self, SchemaError> {
        let value: toml::Value = toml::from_str(content)?;
        let json = serde_json::to_value(value)?;
        Self::from_value(&json)
    }
}
