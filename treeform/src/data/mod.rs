//! Core data structures for schema-driven form trees.
//!
//! This module holds everything the form core is made of:
//!
//! - Schema fragment parsing (JSON/TOML) and error taxonomy
//! - Leaf fields and the closed field kind registry
//! - The recursive tree node with its selection and aggregation rules
//! - The form session owning one loaded tree
//!
//! ## Architecture
//!
//! The data module is organized into several submodules:
//!
//! - [`schema`] - Schema fragment deserialization and [`schema::SchemaError`]
//! - [`field`] - Leaf fields and field kinds
//! - [`node`] - The recursive tree node
//! - [`session`] - Session container and output aggregation

/// Leaf fields and the field kind registry.
pub mod field;

/// The recursive tree node.
pub mod node;

/// Schema fragment parsing and schema errors.
pub mod schema;

/// Session container owning one loaded tree.
pub mod session;

pub use session::FormSession;
