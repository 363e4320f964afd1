//! NetCDF classic-format reader
//!
//! A self-contained reader for the NetCDF classic container (CDF-1 and
//! CDF-2, the formats produced by the classic C library and consumed by the
//! legacy web converter's reader). It parses the header eagerly and reads
//! variable data on demand, exposing everything through the
//! [`DatasetSource`] adapter interface.
//!
//! ## Architecture
//!
//! - [`header`] - magic/version, record count, dimension/attribute/variable
//!   list parsing with bounds-checked cursors
//! - [`data`] - record-region geometry and slab reads for fixed and record
//!   variables
//!
//! The newer HDF5-backed NetCDF-4 format is out of scope; files carrying an
//! HDF5 signature fail cleanly with an invalid-format error.

pub mod data;
pub mod header;

#[cfg(test)]
pub mod tests;

use bytes::Bytes;
use tracing::debug;

use crate::app::models::{AttrValue, Dimension, VariableData, VariableMeta};
use crate::app::source::DatasetSource;
use crate::{Error, Result};

use data::DataLayout;
use header::{ClassicHeader, RawVariable};

/// A parsed classic file: header metadata plus the raw bytes for on-demand
/// data reads
pub struct ClassicDataset {
    buf: Bytes,
    header: ClassicHeader,
    layout: DataLayout,
    dimensions: Vec<Dimension>,
    variables: Vec<VariableMeta>,
}

impl ClassicDataset {
    /// Parse a classic file held fully in memory
    pub fn from_bytes(buf: Bytes) -> Result<Self> {
        let header = header::parse_header(&buf)?;
        let layout = data::compute_layout(&header, buf.len())?;

        let unlimited = header.unlimited_dim_id();
        let dimensions: Vec<Dimension> = header
            .dimensions
            .iter()
            .enumerate()
            .map(|(id, dim)| {
                // The unlimited dimension stores size 0 in the header; its
                // effective size is the record count
                let size = if Some(id) == unlimited {
                    layout.record_count
                } else {
                    dim.declared_size
                };
                Dimension::new(dim.name.clone(), size)
            })
            .collect();

        let variables: Vec<VariableMeta> = header
            .variables
            .iter()
            .map(|var| VariableMeta {
                name: var.name.clone(),
                dimensions: var
                    .dim_ids
                    .iter()
                    .map(|&id| header.dimensions[id].name.clone())
                    .collect(),
                declared_type: var.nc_type.name().to_string(),
                attributes: var.attributes.clone(),
            })
            .collect();

        debug!(
            dimensions = dimensions.len(),
            variables = variables.len(),
            records = layout.record_count,
            "parsed classic header"
        );

        Ok(Self {
            buf,
            header,
            layout,
            dimensions,
            variables,
        })
    }

    /// Parse a classic file from a borrowed byte slice
    pub fn from_slice(buf: &[u8]) -> Result<Self> {
        Self::from_bytes(Bytes::copy_from_slice(buf))
    }

    /// Number of records along the unlimited dimension (0 when the file has
    /// no unlimited dimension)
    pub fn record_count(&self) -> usize {
        self.layout.record_count
    }

    /// The unlimited dimension, if the file declares one
    pub fn unlimited_dimension(&self) -> Option<&Dimension> {
        self.header.unlimited_dim_id().map(|id| &self.dimensions[id])
    }

    /// Attributes attached to the dataset itself rather than a variable
    pub fn global_attributes(&self) -> &[(String, AttrValue)] {
        &self.header.global_attributes
    }

    /// Human-readable name of the container flavor
    pub fn version_name(&self) -> &'static str {
        match self.header.version {
            header::Version::Classic => "NetCDF classic (CDF-1)",
            header::Version::Offset64 => "NetCDF 64-bit offset (CDF-2)",
        }
    }

    fn raw_variable(&self, name: &str) -> Result<&RawVariable> {
        self.header
            .variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| Error::missing_data(name))
    }
}

impl DatasetSource for ClassicDataset {
    fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    fn variables(&self) -> &[VariableMeta] {
        &self.variables
    }

    fn fetch_data(&self, name: &str) -> Result<VariableData> {
        let var = self.raw_variable(name)?;
        data::read_variable(&self.buf, &self.header, &self.layout, var)
    }
}
