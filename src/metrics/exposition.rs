//! Prometheus text exposition rendering.

use crate::metrics::registry::Snapshot;

/// Content type of the rendered document, as expected by pull-based
/// scrapers.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Render a registry snapshot into the text exposition format.
///
/// Series appear in lexicographic (name, labels) order; consecutive
/// series sharing a name are grouped under a single
/// `# TYPE <name> gauge` header, followed by one value line per series.
/// Series without labels omit the `{}` block. An empty snapshot renders
/// as an empty document, and repeated calls over an unchanged snapshot
/// are byte-identical.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let mut current_name: Option<&str> = None;

    for (key, value) in snapshot {
        if current_name != Some(key.name.as_str()) {
            out.push_str(&format!("# TYPE {} gauge\n", key.name));
            current_name = Some(key.name.as_str());
        }

        if key.labels.is_empty() {
            out.push_str(&format!("{} {}\n", key.name, value));
        } else {
            let labels = key
                .labels
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&format!("{}{{{}}} {}\n", key.name, labels, value));
        }
    }

    out
}

/// Escape a label value: backslash, double quote and newline.
fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
