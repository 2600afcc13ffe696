//! Form session: owns the loaded tree and produces the aggregated output.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use log::debug;
use serde_json::Value;

use crate::data::{
    node::TreeNode,
    schema::{SchemaError, SchemaNode},
};

/// An owned editing session over one loaded schema.
///
/// All state lives in the session value itself; there is no ambient or
/// global state. Loading replaces the tree wholesale, and a failed load
/// leaves the previously installed tree untouched.
#[derive(Debug, Default)]
pub struct FormSession {
    root: Option<TreeNode>,
    /// Schema file behind the current tree, when loaded from disk.
    source: Option<PathBuf>,
}

impl FormSession {
    /// Create a session with no schema loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a schema is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    /// The loaded tree root, if any.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// The loaded tree root for mutation (selection and field input).
    pub fn root_mut(&mut self) -> Option<&mut TreeNode> {
        self.root.as_mut()
    }

    /// Path of the schema file behind the current tree, when file-loaded.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Load a schema from an in-memory JSON value.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Parse`] for a malformed fragment and
    /// [`SchemaError::UnknownFieldKind`] for an unregistered kind tag. On
    /// any error no partial tree is installed and the previously loaded
    /// tree, if any, stays in place.
    pub fn load_value(&mut self, schema: &Value) -> Result<(), SchemaError> {
        let fragment = SchemaNode::from_value(schema)?;
        let root = TreeNode::from_schema(&fragment)?;
        self.root = Some(root);
        self.source = None;
        Ok(())
    }

    /// Load a schema document with extension-driven format detection.
    ///
    /// Supported extensions: `json` and `toml`.
    pub fn load_str(&mut self, content: &str, ext: &str) -> anyhow::Result<()> {
        let fragment = match ext {
            "json" => SchemaNode::from_json(content)?,
            "toml" => SchemaNode::from_toml(content)?,
            _ => {
                bail!("unsupported schema file extension: {ext:?}");
            }
        };
        self.root = Some(TreeNode::from_schema(&fragment)?);
        self.source = None;
        Ok(())
    }

    /// Load a schema file (`.json` or `.toml`).
    ///
    /// # Errors
    ///
    /// I/O failures, unsupported extensions, and the structural errors of
    /// [`FormSession::load_value`]; in every case prior session state is
    /// preserved unchanged.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.load_str(&content, ext)?;
        self.source = Some(path.to_path_buf());
        debug!("loaded schema from {}", path.display());
        Ok(())
    }

    /// The aggregated descriptive line, or `None` when nothing is loaded.
    pub fn output(&self) -> Option<String> {
        self.root.as_ref().map(TreeNode::data)
    }
}
