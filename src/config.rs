//! Configuration for conversion runs.
//!
//! A conversion is governed by two row budgets and an optional time-decoding
//! switch. Defaults reproduce the legacy web converter's output exactly.

use crate::constants::{MAX_FLAT_VALUES_PER_VARIABLE, MAX_STRUCTURED_ROWS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters governing one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Total row budget for the structured path, across all variables.
    /// Enumeration stops once this many rows have been collected.
    pub max_rows: usize,

    /// Per-variable value budget for the flat-fallback listing.
    pub max_values_per_variable: usize,

    /// Decode numeric coordinate variables carrying a CF-style
    /// `units = "<unit> since <datetime>"` attribute into ISO-8601 text.
    /// Off by default: the legacy converter emitted the raw numbers.
    pub decode_times: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_rows: MAX_STRUCTURED_ROWS,
            max_values_per_variable: MAX_FLAT_VALUES_PER_VARIABLE,
            decode_times: false,
        }
    }
}

impl ConverterConfig {
    /// Validate the configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 {
            return Err(Error::configuration("max_rows must be greater than zero"));
        }
        if self.max_values_per_variable == 0 {
            return Err(Error::configuration(
                "max_values_per_variable must be greater than zero",
            ));
        }
        Ok(())
    }
}
