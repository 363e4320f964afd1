//! Coordinate value resolution.
//!
//! Each dimension is labeled by the value array of a same-named variable
//! when one exists and can be read; otherwise by the synthetic index
//! sequence `0..size-1`. Resolution happens once per conversion and the
//! results are cached for every row built afterwards.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::app::models::{AttrValue, Dimension, Value, VariableData};
use crate::app::source::DatasetSource;
use crate::config::ConverterConfig;

use super::time::TimeEncoding;

/// Per-dimension coordinate values, cached for the duration of one run
#[derive(Debug, Default)]
pub struct CoordinateTable {
    values: HashMap<String, Vec<Value>>,
}

impl CoordinateTable {
    /// Resolve coordinate values for every declared dimension
    pub fn resolve(source: &dyn DatasetSource, config: &ConverterConfig) -> Self {
        let mut values = HashMap::new();
        for dim in source.dimensions() {
            values.insert(dim.name.clone(), resolve_dimension(source, dim, config));
        }
        Self { values }
    }

    /// Coordinate values for a dimension; `None` for dimension names never
    /// declared by the dataset
    pub fn get(&self, dimension: &str) -> Option<&[Value]> {
        self.values.get(dimension).map(Vec::as_slice)
    }
}

fn resolve_dimension(
    source: &dyn DatasetSource,
    dim: &Dimension,
    config: &ConverterConfig,
) -> Vec<Value> {
    let coordinate_var = source.variables().iter().find(|v| v.name == dim.name);

    if let Some(var) = coordinate_var {
        match source.fetch_data(&dim.name) {
            Ok(VariableData::Array(values)) => {
                if config.decode_times {
                    if let Some(encoding) = time_encoding_of(var.attribute("units")) {
                        debug!(dimension = %dim.name, "decoding time coordinate");
                        return values
                            .into_iter()
                            .map(|v| match v {
                                Value::Number(n) => encoding.decode(n),
                                other => other,
                            })
                            .collect();
                    }
                }
                return values;
            }
            Ok(VariableData::Scalar(_)) => {
                debug!(
                    dimension = %dim.name,
                    "coordinate variable is scalar; synthesizing indices"
                );
            }
            Err(error) => {
                warn!(
                    dimension = %dim.name,
                    %error,
                    "could not read coordinate variable; synthesizing indices"
                );
            }
        }
    }

    (0..dim.size).map(|i| Value::Number(i as f64)).collect()
}

fn time_encoding_of(units: Option<&AttrValue>) -> Option<TimeEncoding> {
    units.and_then(AttrValue::as_text).and_then(TimeEncoding::parse)
}
