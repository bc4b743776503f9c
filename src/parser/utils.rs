//! Utility functions for label escaping and label classification.
//!
//! Labels are stored unescaped in the tree model. The writer escapes them
//! again, so that any label read by the parser can be written back.

/// Characters that force a label into single quotes.
const QUOTE_TRIGGERS: &[char] = &[',', ';', '(', ')', ':', '[', ']', '\''];

/// Escapes a label for Newick output.
///
/// Labels containing whitespace or Newick punctuation are wrapped in single
/// quotes, with internal single quotes doubled. Any other label is written
/// as is, so that parsing the output yields the same label.
///
/// # Examples
/// ```
/// # use nwkit::parser::utils::escape_label;
/// assert_eq!(escape_label("Homo"), "Homo");
/// assert_eq!(escape_label("Homo sapiens"), "'Homo sapiens'");
/// assert_eq!(escape_label("Homo (modern)"), "'Homo (modern)'");
/// assert_eq!(escape_label("Pallas's squirrel"), "'Pallas''s squirrel'");
/// assert_eq!(escape_label("'x'"), "'''x'''");
/// assert_eq!(escape_label(""), "");
/// ```
pub fn escape_label(label: &str) -> String {
    if label
        .chars()
        .any(|c| c.is_whitespace() || QUOTE_TRIGGERS.contains(&c))
    {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

/// Returns whether a label is numeric, as support values on inner nodes are.
///
/// # Examples
/// ```
/// # use nwkit::parser::utils::is_numeric_label;
/// assert!(is_numeric_label("95"));
/// assert!(is_numeric_label("0.87"));
/// assert!(!is_numeric_label("Hominidae"));
/// assert!(!is_numeric_label(""));
/// ```
pub fn is_numeric_label(label: &str) -> bool {
    !label.is_empty() && label.parse::<f64>().is_ok()
}
