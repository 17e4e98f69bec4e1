//! Front-matter value to HTML metadata table.
//!
//! The shapes here are deliberately asymmetric and shallow: the
//! top-level mapping becomes a one-row table, a sequence of mappings
//! becomes a sub-table, and anything nested deeper is JSON-stringified
//! rather than recursively tabled.

use std::fmt::Write;

use mdview_renderer::escape_html;
use serde_yaml::Value;

/// Render the decoded front-matter value as an HTML table.
///
/// Only a top-level mapping produces output: the header row holds the
/// keys in insertion order, a single data row holds the formatted
/// values. Any other top-level shape yields an empty string.
#[must_use]
pub fn front_matter_table(front_matter: &Value) -> String {
    let Value::Mapping(map) = front_matter else {
        return String::new();
    };

    let mut html = String::from("<table>\n<thead>\n<tr>");
    for key in map.keys() {
        write!(html, "<th>{}</th>", escape_html(&scalar_text(key))).unwrap();
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n<tr>");
    for value in map.values() {
        write!(html, "<td>{}</td>", format_value(value)).unwrap();
    }
    html.push_str("</tr>\n</tbody>\n</table>\n");
    html
}

/// Format one cell value.
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Sequence(items) => match items.first() {
            Some(Value::Mapping(_)) => mapping_sequence_table(items),
            _ => items
                .iter()
                .map(|item| escape_html(&scalar_text(item)))
                .collect::<Vec<_>>()
                .join(", "),
        },
        Value::Mapping(map) => {
            let mut html = String::from("<ul>");
            for (key, value) in map {
                write!(
                    html,
                    "<li><strong>{}:</strong> {}</li>",
                    escape_html(&scalar_text(key)),
                    escape_html(&scalar_text(value))
                )
                .unwrap();
            }
            html.push_str("</ul>");
            html
        }
        scalar => escape_html(&scalar_text(scalar)),
    }
}

/// A sequence of mappings (e.g. an author list) becomes its own table.
///
/// The header is the union of keys across all items in first-seen
/// order, repeated once per item; the single data row holds one cell
/// per item per key. Cell values that are themselves structured are
/// JSON-stringified, not recursed into.
fn mapping_sequence_table(items: &[Value]) -> String {
    let mut keys: Vec<&Value> = Vec::new();
    for item in items {
        if let Value::Mapping(map) = item {
            for key in map.keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
    }

    let mut html = String::from(r#"<table style="width: 100%;">"#);
    html.push_str("\n<thead>\n<tr>");
    for _ in items {
        for &key in &keys {
            write!(html, "<th>{}</th>", escape_html(&scalar_text(key))).unwrap();
        }
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n<tr>");
    for item in items {
        for &key in &keys {
            let cell = item.as_mapping().and_then(|map| map.get(key));
            match cell {
                None | Some(Value::Null) => html.push_str("<td></td>"),
                Some(value) => {
                    write!(html, "<td>{}</td>", escape_html(&scalar_text(value))).unwrap();
                }
            }
        }
    }
    html.push_str("</tr>\n</tbody>\n</table>");
    html
}

/// Text form of a value: scalars verbatim, structured values as JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
