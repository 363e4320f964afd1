//! Data model for NetCDF tabularization
//!
//! This module contains the core structures shared by the reader, the
//! tabularizer and the CSV writer: dimensions, variable metadata, scalar
//! values with their normalization rules, and insertion-ordered output rows.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Dimensions and Variables
// =============================================================================

/// A named axis of the dataset's index space
///
/// Serialized as `{"name": ..., "size": ...}` — the flat-fallback preamble
/// embeds the dimension list as JSON in exactly this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name, e.g. "latitude"
    pub name: String,

    /// Declared size; for the unlimited dimension, the record count
    pub size: usize,
}

impl Dimension {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// An attribute value attached to a variable or to the dataset itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Character attribute, decoded as text (e.g. `units = "degC"`)
    Text(String),

    /// Numeric attribute, widened to f64 (e.g. `_FillValue = [-999.0]`)
    Numeric(Vec<f64>),
}

impl AttrValue {
    /// The attribute as text, if it is a character attribute
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Numeric(_) => None,
        }
    }
}

/// Metadata of one variable: its name, axes, declared element type and
/// attribute bag. The value array itself is fetched separately through
/// [`crate::app::source::DatasetSource::fetch_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMeta {
    /// Variable name, e.g. "temperature"
    pub name: String,

    /// Dimension names in row-major declaration order (last varies fastest);
    /// empty for scalar variables
    pub dimensions: Vec<String>,

    /// Declared element type name ("byte", "char", "short", "int", "float",
    /// "double")
    pub declared_type: String,

    /// Attributes in declaration order
    pub attributes: Vec<(String, AttrValue)>,
}

impl VariableMeta {
    pub fn new(
        name: impl Into<String>,
        dimensions: Vec<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions,
            declared_type: declared_type.into(),
            attributes: Vec::new(),
        }
    }

    /// Whether this variable has no dimensions at all
    pub fn is_scalar(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value)
    }
}

// =============================================================================
// Values
// =============================================================================

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A finite or non-finite number; non-finite numbers normalize to
    /// [`Value::Missing`]
    Number(f64),

    /// Text, e.g. from a char variable or a decoded timestamp
    Text(String),

    /// A point in time; normalizes to ISO-8601 text
    Time(DateTime<Utc>),

    /// Absent / null / undefined; renders as an empty field
    Missing,
}

impl Value {
    /// Apply the scalar normalization rules used everywhere a value is
    /// placed into a row or listed by the fallback:
    /// non-finite numbers become missing, times become ISO-8601 text
    /// (millisecond precision, `Z` suffix), everything else is unchanged.
    pub fn normalize(self) -> Value {
        match self {
            Value::Number(n) if !n.is_finite() => Value::Missing,
            Value::Time(t) => Value::Text(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            other => other,
        }
    }
}

/// The materialized data of one variable
#[derive(Debug, Clone, PartialEq)]
pub enum VariableData {
    /// A flat array of scalars laid out in row-major order
    Array(Vec<Value>),

    /// A single scalar (zero-dimensional variables, and char variables
    /// materialized as one text blob)
    Scalar(Value),
}

// =============================================================================
// Rows
// =============================================================================

/// One output row: a column→value map preserving insertion order.
///
/// Writing a column that already exists replaces its value in place, keeping
/// the original position. The legacy converter built rows as plain objects,
/// so a coordinate variable tabularized over its own dimension collapses to
/// a single column; that behavior is kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing in place if the column already exists
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        if let Some(cell) = self.cells.iter_mut().find(|(name, _)| *name == column) {
            cell.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    /// Get a column value by name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
