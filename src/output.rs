//! CSV output formatting.
//!
//! Converts looked-up event values into CSV cells and assembles rows.
//! Rendering is controlled by [`ValueEncodings`], which decides how
//! absent paths, booleans, and nulls appear in the output.

use serde_json::Value;

/// A CSV column: a dotted lookup path plus the header name to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Dotted path resolved against each event.
    pub path: String,
    /// Header shown for this column.
    pub name: String,
}

impl ColumnSpec {
    /// Parse a `path[:name]` column spec.
    ///
    /// Everything before the first `:` is the path; the remainder is the
    /// display name. Without a `:`, the path doubles as the name.
    ///
    /// # Example
    ///
    /// ```
    /// use bugsnag_export::ColumnSpec;
    ///
    /// let col = ColumnSpec::parse("metaData.user.id:user_id");
    /// assert_eq!(col.path, "metaData.user.id");
    /// assert_eq!(col.name, "user_id");
    /// ```
    pub fn parse(spec: &str) -> Self {
        match spec.split_once(':') {
            Some((path, name)) => Self {
                path: path.to_string(),
                name: name.to_string(),
            },
            None => Self {
                path: spec.to_string(),
                name: spec.to_string(),
            },
        }
    }
}

/// Strings used to render values that have no natural text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEncodings {
    /// Rendered when the column path is absent from the event.
    pub not_set: String,
    /// Rendered for boolean `true`.
    pub true_value: String,
    /// Rendered for boolean `false`.
    pub false_value: String,
    /// Rendered for JSON `null`.
    pub null_value: String,
}

impl Default for ValueEncodings {
    fn default() -> Self {
        Self {
            not_set: String::new(),
            true_value: "true".to_string(),
            false_value: "false".to_string(),
            null_value: String::new(),
        }
    }
}

/// Render one looked-up value as a CSV cell.
///
/// `None` means the path was absent from the event, which renders
/// differently from a present `null`. Objects and arrays become compact
/// JSON; strings and numbers keep their literal form.
pub fn encode_value(value: Option<&Value>, encodings: &ValueEncodings) -> String {
    match value {
        None => encodings.not_set.clone(),
        Some(Value::Bool(true)) => encodings.true_value.clone(),
        Some(Value::Bool(false)) => encodings.false_value.clone(),
        Some(Value::Null) => encodings.null_value.clone(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Quote a field per RFC 4180 when it contains a comma, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Append one CSV row to `out`, LF-terminated.
pub fn write_row(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}
