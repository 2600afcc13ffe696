//! Leaf fields and the field kind registry.

/// A single user-entered datum attached to a tree node.
///
/// The raw value lives inside [`FieldKind`]; the presentation layer keeps it
/// synchronized with its input widget, and aggregation reads it back as one
/// opaque string through [`Field::value`].
#[derive(Debug, Clone)]
pub struct Field {
    /// Label / placeholder text, fixed at build time.
    pub name: String,
    /// Raw value storage with kind-specific aggregation.
    pub kind: FieldKind,
}

/// Supported field kinds with their raw value storage.
///
/// The registry is closed and explicit: adding a kind means adding a variant
/// here together with its tag in [`FieldKind::resolve`]. Unregistered tags
/// fail the whole schema load instead of degrading silently.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// One line of text, aggregated unmodified.
    SingleLine { text: String },
    /// Multi-line text, aggregated as its lines joined with `", "`.
    MultiLine { text: String },
    /// Relative file paths chosen by the user, aggregated joined with `", "`.
    MultiFile { paths: Vec<String> },
}

impl FieldKind {
    /// Registered kind tags, in registry order.
    pub const KINDS: [&'static str; 3] = ["single-line", "multi-line", "multi-file"];

    /// Resolve a schema kind tag into an empty field value of that kind.
    ///
    /// Returns `None` for tags absent from the registry; the tree builder
    /// turns that into [`SchemaError::UnknownFieldKind`] with path context.
    ///
    /// [`SchemaError::UnknownFieldKind`]: crate::data::schema::SchemaError
    pub fn resolve(tag: &str) -> Option<FieldKind> {
        match tag {
            "single-line" => Some(FieldKind::SingleLine {
                text: String::new(),
            }),
            "multi-line" => Some(FieldKind::MultiLine {
                text: String::new(),
            }),
            "multi-file" => Some(FieldKind::MultiFile { paths: Vec::new() }),
            _ => None,
        }
    }

    /// The registry tag of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::SingleLine { .. } => "single-line",
            FieldKind::MultiLine { .. } => "multi-line",
            FieldKind::MultiFile { .. } => "multi-file",
        }
    }
}

impl Field {
    /// Current value as one opaque string.
    ///
    /// Pure function of the raw value: reading never mutates, and repeated
    /// calls yield identical strings.
    pub fn value(&self) -> String {
        match &self.kind {
            FieldKind::SingleLine { text } => text.clone(),
            FieldKind::MultiLine { text } => {
                text.split('\n').collect::<Vec<_>>().join(", ")
            }
            FieldKind::MultiFile { paths } => paths.join(", "),
        }
    }

    /// Feed one unit of user input into the raw value.
    ///
    /// Text kinds replace their text; a file list appends the path, the way
    /// a picker adds files one at a time.
    pub fn apply_input(&mut self, input: &str) {
        match &mut self.kind {
            FieldKind::SingleLine { text } | FieldKind::MultiLine { text } => {
                *text = input.to_string();
            }
            FieldKind::MultiFile { paths } => paths.push(input.to_string()),
        }
    }
}
