//! Tests for the NetCDF classic reader

pub mod fixtures;
