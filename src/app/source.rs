//! The adapter seam between binary readers and the tabularizer.
//!
//! The tabularizer never touches bytes: everything it knows about a dataset
//! comes through [`DatasetSource`], which exposes exactly three operations.
//! The production implementation is
//! [`crate::app::services::classic_reader::ClassicDataset`];
//! [`MemoryDataset`] backs tests and embedders.

use std::collections::HashMap;

use crate::app::models::{Dimension, VariableData, VariableMeta};
use crate::{Error, Result};

/// A parsed dataset, seen through the narrow interface the tabularizer needs
pub trait DatasetSource {
    /// Declared dimensions, in file order
    fn dimensions(&self) -> &[Dimension];

    /// Declared variables, in file order
    fn variables(&self) -> &[VariableMeta];

    /// Fully materialize the data of one variable.
    ///
    /// Failures here are recoverable: the tabularizer and the fallback both
    /// log and skip the variable rather than aborting the conversion.
    fn fetch_data(&self, name: &str) -> Result<VariableData>;
}

/// An in-memory dataset, built up programmatically
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    dimensions: Vec<Dimension>,
    variables: Vec<VariableMeta>,
    data: HashMap<String, VariableData>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dimension
    pub fn with_dimension(mut self, name: impl Into<String>, size: usize) -> Self {
        self.dimensions.push(Dimension::new(name, size));
        self
    }

    /// Declare a variable together with its data
    pub fn with_variable(mut self, meta: VariableMeta, data: VariableData) -> Self {
        self.data.insert(meta.name.clone(), data);
        self.variables.push(meta);
        self
    }

    /// Declare a variable whose data fetch will fail; used to exercise the
    /// warn-and-skip paths
    pub fn with_unreadable_variable(mut self, meta: VariableMeta) -> Self {
        self.variables.push(meta);
        self
    }
}

impl DatasetSource for MemoryDataset {
    fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    fn variables(&self) -> &[VariableMeta] {
        &self.variables
    }

    fn fetch_data(&self, name: &str) -> Result<VariableData> {
        self.data
            .get(name)
            .cloned()
            .ok_or_else(|| Error::missing_data(name))
    }
}
