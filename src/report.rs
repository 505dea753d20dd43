use std::fmt::Write as _;

use crate::traits::Label;

pub const HEADER: &str = "Detected objects:";

pub fn format_label(label: &Label) -> String {
    format!("{} (Confidence: {:.2}%)", label.name, label.confidence)
}

/// Render the whole report, header included, one line per label in the given order.
pub fn render(labels: &[Label]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + labels.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for label in labels {
        // writing into a String cannot fail
        let _ = writeln!(out, "{}", format_label(label));
    }
    out
}
