//! # treeform
//!
//! Schema-driven adaptive form trees that aggregate into one descriptive
//! line of text.
//!
//! A form's shape is not fixed at build time: it is derived from a JSON (or
//! TOML) schema describing a tree of named branch points, each offering a
//! mutually exclusive choice among child branches, plus leaf input fields at
//! any level. The user walks the tree, picking one child at every branching
//! node and filling fields along the way; the session then collapses the
//! active path into a single string.
//!
//! ## Features
//!
//! - Recursive schema interpretation with eager full-tree construction
//! - Exactly one active branch per branching node, first-in-schema-order by
//!   default
//! - Field values retained when a branch is deactivated and reselected
//! - Closed field kind registry that fails fast on unknown kinds
//! - Multi-format support: JSON and TOML schema documents
//!
//! ## Quick Start
//!
//! ```rust
//! use treeform::FormSession;
//!
//! let schema = serde_json::json!({
//!     "subwidgets": [
//!         {
//!             "name": "Issue",
//!             "properties": [
//!                 {"name": "issue_number", "field": "single-line"}
//!             ]
//!         }
//!     ]
//! });
//!
//! let mut session = FormSession::new();
//! session.load_value(&schema).unwrap();
//!
//! session
//!     .root_mut()
//!     .and_then(|root| root.get_mut_by_path("Issue"))
//!     .and_then(|node| node.field_mut("issue_number"))
//!     .unwrap()
//!     .apply_input("42");
//!
//! assert_eq!(session.output().as_deref(), Some("Issue 42"));
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema parsing, tree nodes, field kinds, and the session

/// Core data structures for schema-driven form trees.
pub mod data;

pub use data::FormSession;
pub use data::field::{Field, FieldKind};
pub use data::node::TreeNode;
pub use data::schema::{PropertySpec, SchemaError, SchemaNode};
pub use serde_json::Value;
