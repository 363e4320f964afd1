//! The flat-fallback listing.
//!
//! Used when the structured path produces no rows at all (datasets of
//! scalars, unreadable data, empty shapes). Each variable is listed under a
//! comment header as bare `index,value` pairs, capped per variable, so the
//! user still gets a usable text file instead of an error. The comment
//! strings are the legacy converter's, verbatim.

use tracing::warn;

use crate::app::models::VariableData;
use crate::app::source::DatasetSource;
use crate::config::ConverterConfig;
use crate::app::services::csv_writer::render_value;
use crate::constants::legacy;

/// Produce the per-variable flat listing. Never fails: unreadable
/// variables are logged and skipped, and the metadata preamble alone is a
/// valid result.
pub fn flatten(source: &dyn DatasetSource, config: &ConverterConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(legacy::FALLBACK_TITLE.to_string());
    let dimensions_json = serde_json::to_string(source.dimensions())
        .unwrap_or_else(|_| "[]".to_string());
    lines.push(format!(
        "{}{}",
        legacy::FALLBACK_DIMENSIONS_PREFIX,
        dimensions_json
    ));
    lines.push(String::new());

    for variable in source.variables() {
        let data = match source.fetch_data(&variable.name) {
            Ok(data) => data,
            Err(error) => {
                warn!(variable = %variable.name, %error, "skipping unreadable variable");
                continue;
            }
        };

        lines.push(format!(
            "{}{}",
            legacy::FALLBACK_VARIABLE_PREFIX,
            variable.name
        ));
        lines.push(format!(
            "{}{}",
            legacy::FALLBACK_DIMENSIONS_PREFIX,
            variable.dimensions.join(", ")
        ));
        lines.push(format!(
            "{}{}",
            legacy::FALLBACK_TYPE_PREFIX,
            variable.declared_type
        ));

        match data {
            VariableData::Array(values) => {
                lines.push("index,value".to_string());
                let shown = values.len().min(config.max_values_per_variable);
                for (index, value) in values.iter().take(shown).enumerate() {
                    lines.push(format!(
                        "{},{}",
                        index,
                        render_value(&value.clone().normalize())
                    ));
                }
                if values.len() > shown {
                    lines.push(format!(
                        "# ... {} {}",
                        values.len() - shown,
                        legacy::FALLBACK_OMITTED_SUFFIX
                    ));
                }
            }
            VariableData::Scalar(value) => {
                lines.push(format!("value: {}", render_value(&value.normalize())));
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}
