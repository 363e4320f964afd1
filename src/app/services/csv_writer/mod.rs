//! CSV serialization
//!
//! Renders an ordered row sequence into CSV text with the exact field
//! semantics of the legacy web converter: header taken from the first
//! row's column order, text fields containing a comma wrapped in double
//! quotes (embedded quotes are not escaped — a known legacy limitation kept
//! for byte compatibility), missing cells rendered empty, and a verbatim
//! placeholder string when there are no rows at all.
//!
//! Rows are assumed homogeneous in column set; this is an invariant the
//! tabularizer upholds, not one the serializer validates. A row missing a
//! header column serializes that cell empty; extra columns are dropped.


use crate::app::models::{Row, Value};
use crate::constants::legacy;

/// Serialize rows to CSV text. Pure and deterministic: the same rows always
/// produce byte-identical output, with no trailing newline.
pub fn serialize(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return legacy::EMPTY_EXPORT_PLACEHOLDER.to_string();
    };

    let header: Vec<&str> = first.columns().collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header.join(","));

    for row in rows {
        let fields: Vec<String> = header
            .iter()
            .map(|column| match row.get(column) {
                Some(value) => render_field(value),
                None => String::new(),
            })
            .collect();
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// Render one value as raw (unquoted) field text: numbers via their f64
/// display, missing as empty, times as ISO-8601
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Missing => String::new(),
        Value::Number(n) => {
            if n.is_finite() {
                format!("{}", n)
            } else {
                String::new()
            }
        }
        Value::Text(s) => s.clone(),
        Value::Time(_) => render_value(&value.clone().normalize()),
    }
}

/// Render one cell, applying the comma-quoting rule to text values
fn render_field(value: &Value) -> String {
    let rendered = render_value(value);
    let is_text = matches!(value, Value::Text(_));
    if is_text && rendered.contains(',') {
        format!("\"{}\"", rendered)
    } else {
        rendered
    }
}
