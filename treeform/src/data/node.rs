//! The recursive tree node: construction, selection, addressing, aggregation.

use log::debug;

use crate::data::{
    field::{Field, FieldKind},
    schema::{SchemaError, SchemaNode},
};

/// The recursive structural unit of a form tree.
///
/// A node exclusively owns its leaf fields and child branches. The whole
/// tree is built eagerly from the schema, so inactive branches remain
/// addressable and activation is a plain index swap. When children exist,
/// exactly one of them is active at any time; only the active branch
/// contributes to [`TreeNode::data`].
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Branch name, fixed at build time.
    pub name: String,
    /// Leaf fields in schema order. Values mutate through user input; the
    /// set itself never changes after build.
    pub fields: Vec<Field>,
    children: Vec<TreeNode>,
    /// Index of the active child. `Some` iff `children` is non-empty.
    active: Option<usize>,
    /// Dot-separated path from the root, for error context.
    path: String,
    root: bool,
}

impl TreeNode {
    /// Build a tree root from a parsed schema fragment.
    ///
    /// The root is a pure container: its own name and fields never appear in
    /// the aggregated output.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownFieldKind`] when any property anywhere in the
    /// fragment carries an unregistered kind tag. The whole build aborts; a
    /// partial tree is never returned.
    pub fn from_schema(schema: &SchemaNode) -> Result<Self, SchemaError> {
        let root = Self::build(schema, "", true)?;
        debug!(
            "built form tree `{}` with {} top-level branches",
            root.name,
            root.children.len()
        );
        Ok(root)
    }

    fn build(schema: &SchemaNode, path: &str, root: bool) -> Result<Self, SchemaError> {
        let child_path = |segment: &str| -> String {
            if path.is_empty() {
                segment.to_string()
            } else {
                format!("{path}.{segment}")
            }
        };

        let mut fields = Vec::with_capacity(schema.properties.len());
        for prop in &schema.properties {
            let kind =
                FieldKind::resolve(&prop.kind).ok_or_else(|| SchemaError::UnknownFieldKind {
                    path: child_path(&prop.name),
                    kind: prop.kind.clone(),
                })?;
            fields.push(Field {
                name: prop.name.clone(),
                kind,
            });
        }

        let mut children = Vec::with_capacity(schema.subwidgets.len());
        for sub in &schema.subwidgets {
            children.push(Self::build(sub, &child_path(&sub.name), false)?);
        }

        // The first branch in schema order starts active. Deterministic
        // default: the same entry a selection control shows initially.
        let active = if children.is_empty() { None } else { Some(0) };

        Ok(TreeNode {
            name: schema.name.clone(),
            fields,
            children,
            active,
            path: path.to_string(),
            root,
        })
    }

    /// Whether this node is the tree root.
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Dot-separated path of this node from the root (empty for the root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Child branches in schema order.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Child branch names in schema order, for a selection control.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a child branch by name (first match in schema order).
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable lookup of a child branch by name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut TreeNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// The active child branch. `None` only when the node has no children.
    pub fn active_child(&self) -> Option<&TreeNode> {
        self.active.map(|idx| &self.children[idx])
    }

    /// The active child branch for mutation.
    pub fn active_child_mut(&mut self) -> Option<&mut TreeNode> {
        match self.active {
            Some(idx) => Some(&mut self.children[idx]),
            None => None,
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Mutable lookup of a field by name, for input synchronization.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Activate the child registered under `name`.
    ///
    /// Field values in the deactivated subtree are retained, so selecting a
    /// previously active branch again restores its prior input.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownChild`] when no child carries the name; the
    /// active selection stays unchanged.
    pub fn select_child(&mut self, name: &str) -> Result<(), SchemaError> {
        match self.children.iter().position(|c| c.name == name) {
            Some(idx) => {
                self.active = Some(idx);
                Ok(())
            }
            None => Err(SchemaError::UnknownChild {
                path: self.path.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Select every segment of a dot-separated path, from this node down.
    ///
    /// The empty path selects nothing. Segments before a failing one stay
    /// selected.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownChild`] for the first segment that names no
    /// child of the node reached so far.
    pub fn select_path(&mut self, path: &str) -> Result<(), SchemaError> {
        if path.is_empty() {
            return Ok(());
        }
        let mut node = self;
        for segment in path.split('.') {
            let idx = node
                .children
                .iter()
                .position(|c| c.name == segment)
                .ok_or_else(|| SchemaError::UnknownChild {
                    path: node.path.clone(),
                    name: segment.to_string(),
                })?;
            node.active = Some(idx);
            node = &mut node.children[idx];
        }
        Ok(())
    }

    /// Address a node by dot-separated child names; the empty path is `self`.
    ///
    /// The lookup ignores selection state, so inactive branches stay
    /// addressable.
    pub fn get_by_path(&self, path: &str) -> Option<&TreeNode> {
        if path.is_empty() {
            return Some(self);
        }
        let mut node = self;
        for segment in path.split('.') {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Mutable counterpart of [`TreeNode::get_by_path`].
    pub fn get_mut_by_path(&mut self, path: &str) -> Option<&mut TreeNode> {
        if path.is_empty() {
            return Some(self);
        }
        let mut node = self;
        for segment in path.split('.') {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    /// Collapse the active path below this node into one descriptive line.
    ///
    /// The root contributes nothing of its own: its aggregation is exactly
    /// the aggregation of its active child, or the empty string for a
    /// childless root. A non-root node emits its name (even when empty),
    /// then `" "` plus its field values joined with `", "` when it has
    /// fields, then `" "` plus the active child's aggregation when it has
    /// children. Pure and idempotent: calling this never mutates the tree.
    pub fn data(&self) -> String {
        if self.root {
            return self.active_child().map(TreeNode::data).unwrap_or_default();
        }
        let mut out = self.name.clone();
        if !self.fields.is_empty() {
            let values: Vec<String> = self.fields.iter().map(Field::value).collect();
            out.push(' ');
            out.push_str(&values.join(", "));
        }
        if let Some(child) = self.active_child() {
            out.push(' ');
            out.push_str(&child.data());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::SchemaNode;

    /// The nested issue-report schema used across the selection and
    /// aggregation tests.
    fn issue_schema() -> SchemaNode {
        SchemaNode::from_json(
            r#"{
                "subwidgets": [
                    {
                        "name": "Issue",
                        "properties": [
                            {"name": "issue_number", "field": "single-line"}
                        ],
                        "subwidgets": [
                            {
                                "name": "In file(s)",
                                "properties": [
                                    {"name": "file_names", "field": "multi-file"}
                                ]
                            },
                            {
                                "name": "In class",
                                "properties": [
                                    {"name": "class_names", "field": "multi-line"}
                                ]
                            },
                            {
                                "name": ""
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    fn assert_exactly_one_active(node: &TreeNode) {
        if node.children().is_empty() {
            assert!(node.active_child().is_none(), "leaf nodes have no active child");
        } else {
            assert!(
                node.active_child().is_some(),
                "branch `{}` must have an active child",
                node.name
            );
        }
        for child in node.children() {
            assert_exactly_one_active(child);
        }
    }

    #[test]
    fn test_build_activates_first_branch_in_schema_order() {
        let tree = TreeNode::from_schema(&issue_schema()).unwrap();
        assert!(tree.is_root());
        assert_eq!(tree.active_child().unwrap().name, "Issue");
        let issue = tree.child("Issue").unwrap();
        assert_eq!(issue.active_child().unwrap().name, "In file(s)");
        assert_exactly_one_active(&tree);
    }

    #[test]
    fn test_build_keeps_children_in_schema_order() {
        let tree = TreeNode::from_schema(&issue_schema()).unwrap();
        let issue = tree.child("Issue").unwrap();
        assert_eq!(issue.child_names(), ["In file(s)", "In class", ""]);
    }

    #[test]
    fn test_build_rejects_unknown_field_kind() {
        let schema = SchemaNode::from_json(
            r#"{
                "subwidgets": [
                    {
                        "name": "Issue",
                        "properties": [
                            {"name": "issue_number", "field": "LineEdit"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let err = TreeNode::from_schema(&schema).unwrap_err();
        match err {
            SchemaError::UnknownFieldKind { path, kind } => {
                assert_eq!(path, "Issue.issue_number");
                assert_eq!(kind, "LineEdit");
            }
            other => panic!("expected UnknownFieldKind, got {other:?}"),
        }
    }

    #[test]
    fn test_single_field_aggregation() {
        let schema = SchemaNode::from_json(
            r#"{
                "subwidgets": [
                    {
                        "name": "Issue",
                        "properties": [
                            {"name": "issue_number", "field": "single-line"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let mut tree = TreeNode::from_schema(&schema).unwrap();
        tree.get_mut_by_path("Issue")
            .unwrap()
            .field_mut("issue_number")
            .unwrap()
            .apply_input("42");
        assert_eq!(tree.data(), "Issue 42");
    }

    #[test]
    fn test_nested_aggregation_follows_active_path() {
        let mut tree = TreeNode::from_schema(&issue_schema()).unwrap();
        tree.get_mut_by_path("Issue")
            .unwrap()
            .field_mut("issue_number")
            .unwrap()
            .apply_input("7");
        tree.select_path("Issue.In class").unwrap();
        tree.get_mut_by_path("Issue.In class")
            .unwrap()
            .field_mut("class_names")
            .unwrap()
            .apply_input("Foo\nBar");
        assert_eq!(tree.data(), "Issue 7 In class Foo, Bar");
    }

    #[test]
    fn test_data_is_idempotent() {
        let mut tree = TreeNode::from_schema(&issue_schema()).unwrap();
        tree.select_path("Issue.In class").unwrap();
        let first = tree.data();
        let second = tree.data();
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_name_and_fields_are_omitted() {
        let schema = SchemaNode::from_json(
            r#"{
                "name": "hidden root",
                "properties": [
                    {"name": "root_field", "field": "single-line"}
                ],
                "subwidgets": [
                    {"name": "Visible"}
                ]
            }"#,
        )
        .unwrap();
        let mut tree = TreeNode::from_schema(&schema).unwrap();
        tree.field_mut("root_field").unwrap().apply_input("secret");
        assert_eq!(tree.data(), "Visible");
    }

    #[test]
    fn test_childless_root_aggregates_to_empty() {
        let schema = SchemaNode::from_json(r#"{"name": "only a root"}"#).unwrap();
        let tree = TreeNode::from_schema(&schema).unwrap();
        assert!(tree.active_child().is_none());
        assert_eq!(tree.data(), "");
    }

    #[test]
    fn test_empty_branch_name_is_still_emitted() {
        let mut tree = TreeNode::from_schema(&issue_schema()).unwrap();
        tree.get_mut_by_path("Issue")
            .unwrap()
            .field_mut("issue_number")
            .unwrap()
            .apply_input("5");
        tree.get_mut_by_path("Issue").unwrap().select_child("").unwrap();
        assert_eq!(tree.data(), "Issue 5 ");
    }

    #[test]
    fn test_select_unknown_child_leaves_state_intact() {
        let mut tree = TreeNode::from_schema(&issue_schema()).unwrap();
        let before = tree.data();
        let err = tree
            .get_mut_by_path("Issue")
            .unwrap()
            .select_child("DoesNotExist")
            .unwrap_err();
        match err {
            SchemaError::UnknownChild { path, name } => {
                assert_eq!(path, "Issue");
                assert_eq!(name, "DoesNotExist");
            }
            other => panic!("expected UnknownChild, got {other:?}"),
        }
        assert_eq!(tree.data(), before, "rejected selection must not change output");
    }

    #[test]
    fn test_select_path_failure_keeps_earlier_segments() {
        let mut tree = TreeNode::from_schema(&issue_schema()).unwrap();
        tree.select_path("Issue.In class").unwrap();
        let err = tree.select_path("Issue.Nope").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownChild { .. }));
        // "Issue" was selected before the bad segment; its own selection is
        // untouched by the failure.
        assert_eq!(tree.active_child().unwrap().name, "Issue");
        let issue = tree.child("Issue").unwrap();
        assert_eq!(issue.active_child().unwrap().name, "In class");
    }

    #[test]
    fn test_state_retention_across_reselection() {
        let mut tree = TreeNode::from_schema(&issue_schema()).unwrap();
        tree.select_path("Issue.In class").unwrap();
        tree.get_mut_by_path("Issue.In class")
            .unwrap()
            .field_mut("class_names")
            .unwrap()
            .apply_input("Foo\nBar");

        tree.select_path("Issue.In file(s)").unwrap();
        assert!(!tree.data().contains("Foo, Bar"), "inactive branches do not contribute");

        tree.select_path("Issue.In class").unwrap();
        assert!(
            tree.data().contains("In class Foo, Bar"),
            "field values survive branch deactivation"
        );
    }

    #[test]
    fn test_inactive_branches_stay_addressable() {
        let tree = TreeNode::from_schema(&issue_schema()).unwrap();
        // "In class" is not active after build.
        let node = tree.get_by_path("Issue.In class").unwrap();
        assert_eq!(node.name, "In class");
        assert_eq!(node.path(), "Issue.In class");
        assert!(tree.get_by_path("Issue.Missing").is_none());
        assert_eq!(tree.get_by_path("").unwrap().name, tree.name);
    }

    #[test]
    fn test_duplicate_child_names_resolve_to_first() {
        let schema = SchemaNode::from_json(
            r#"{
                "subwidgets": [
                    {"name": "Twin", "properties": [{"name": "a", "field": "single-line"}]},
                    {"name": "Twin", "properties": [{"name": "b", "field": "single-line"}]}
                ]
            }"#,
        )
        .unwrap();
        let tree = TreeNode::from_schema(&schema).unwrap();
        assert_eq!(tree.children().len(), 2, "both twins are built");
        assert!(tree.child("Twin").unwrap().field("a").is_some());
    }
}
