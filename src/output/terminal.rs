//! Terminal output utilities.

use colored::Colorize;

/// Width of the label column in descriptions.
pub const LABEL_WIDTH: usize = 12;

/// Format a right-aligned, highlighted label followed by its value.
///
/// # Arguments
/// * `label` - The field name
/// * `value` - The value to show after the label
/// * `width` - The minimum width of the label column
pub fn format_field<T: ToString>(label: &str, value: T, width: usize) -> String {
    let padded = format!("{label:>width$}");
    format!("{}: {}", padded.cyan(), value.to_string())
}

/// Format a heading line: the input as typed and what it was recognised as.
pub fn format_heading(input: &str, kind: &str) -> String {
    format!("{} {}", input.bold(), format!("[{kind}]").green())
}

/// Comma-separated list of the flags that are set, or `-` when none are.
pub fn format_flags(flags: &[(&str, bool)]) -> String {
    let set: Vec<&str> = flags
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();
    if set.is_empty() {
        "-".to_string()
    } else {
        set.join(", ")
    }
}
