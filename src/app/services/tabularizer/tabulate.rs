//! The structured tabularization path.
//!
//! Each data variable is flattened into one row per coordinate tuple:
//! dimension columns first, in the variable's declared order, then a value
//! column named after the variable. The whole pass is infallible — a
//! variable whose data cannot be read is logged and skipped — and bounded
//! by a global row budget.

use tracing::warn;

use crate::app::models::{Row, Value, VariableData, VariableMeta};
use crate::app::source::DatasetSource;
use crate::config::ConverterConfig;

use super::coordinates::CoordinateTable;
use super::odometer::Odometer;

/// Flatten every data variable of the dataset into rows.
///
/// Returns an empty vector when nothing is tabularizable (all variables
/// scalar, unreadable, or over empty shapes); the caller is expected to
/// fall back to the flat listing in that case.
pub fn tabularize(source: &dyn DatasetSource, config: &ConverterConfig) -> Vec<Row> {
    let coordinates = CoordinateTable::resolve(source, config);
    let mut rows: Vec<Row> = Vec::new();

    'variables: for variable in data_variables(source) {
        // Scalars have no coordinate grid to span
        if variable.is_scalar() {
            continue;
        }

        let values = match source.fetch_data(&variable.name) {
            Ok(VariableData::Array(values)) => values,
            Ok(VariableData::Scalar(_)) => continue,
            Err(error) => {
                warn!(variable = %variable.name, %error, "skipping unreadable variable");
                continue;
            }
        };

        let sizes = axis_sizes(source, variable);
        for (flat_index, indices) in Odometer::new(&sizes).enumerate() {
            if rows.len() >= config.max_rows {
                warn!(
                    limit = config.max_rows,
                    "row budget reached; truncating output"
                );
                break 'variables;
            }

            let mut row = Row::new();
            for (axis, dimension) in variable.dimensions.iter().enumerate() {
                let cell = match coordinates.get(dimension) {
                    Some(coordinate_values) => coordinate_values
                        .get(indices[axis])
                        .cloned()
                        .unwrap_or(Value::Missing),
                    // Undeclared dimension: label with the raw index
                    None => Value::Number(indices[axis] as f64),
                };
                row.set(dimension.clone(), cell.normalize());
            }
            let cell = values.get(flat_index).cloned().unwrap_or(Value::Missing);
            row.set(variable.name.clone(), cell.normalize());
            rows.push(row);
        }
    }

    rows
}

/// Select the variables to export: everything whose name is not a dimension
/// name, plus any dimension-named variable that itself has dimensions. When
/// that filter selects nothing, every variable is exported.
fn data_variables(source: &dyn DatasetSource) -> Vec<&VariableMeta> {
    let variables = source.variables();
    let is_dimension_name =
        |name: &str| source.dimensions().iter().any(|d| d.name == name);

    let data_vars: Vec<&VariableMeta> = variables
        .iter()
        .filter(|v| !is_dimension_name(&v.name) || !v.dimensions.is_empty())
        .collect();

    if data_vars.is_empty() {
        variables.iter().collect()
    } else {
        data_vars
    }
}

/// Resolve the size of each axis of a variable. A dimension name with no
/// declared dimension degrades to size 1 rather than failing, keeping
/// malformed files convertible.
fn axis_sizes(source: &dyn DatasetSource, variable: &VariableMeta) -> Vec<usize> {
    variable
        .dimensions
        .iter()
        .map(|name| {
            source
                .dimensions()
                .iter()
                .find(|d| &d.name == name)
                .map_or(1, |d| d.size)
        })
        .collect()
}
