//! Conversion orchestration.
//!
//! Wires the reader, the tabularizer and the serializer together for one
//! input file: parse, tabularize, fall back to the flat listing when the
//! structured path yields nothing, and name the output after the input.

use std::path::Path;
use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use tracing::{info, warn};

use crate::app::services::classic_reader::ClassicDataset;
use crate::app::services::csv_writer;
use crate::app::services::tabularizer;
use crate::app::source::DatasetSource;
use crate::config::ConverterConfig;
use crate::constants::OUTPUT_EXTENSION;
use crate::{Error, Result};

/// Which path produced the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One row per coordinate tuple, serialized as CSV
    Structured,
    /// Per-variable flat listing with metadata comments
    Flat,
}

/// The result of one conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Suggested output file name (input name with `.nc` replaced by `.csv`)
    pub file_name: String,
    /// The produced text (UTF-8 CSV, or the flat listing)
    pub contents: String,
    /// Which path produced `contents`
    pub mode: OutputMode,
    /// Rows emitted by the structured path (0 in flat mode)
    pub row_count: usize,
}

fn nc_suffix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.nc$").expect("suffix pattern is valid"))
}

/// Convert an in-memory NetCDF classic payload to CSV text.
///
/// `file_name` must end in `.nc` (case-insensitive); the conversion result
/// carries the same name with the extension replaced. Per-variable problems
/// are recovered internally — an error return means the file as a whole was
/// unusable.
pub fn convert_bytes(file_name: &str, data: &[u8], config: &ConverterConfig) -> Result<Conversion> {
    config.validate()?;

    if !nc_suffix().is_match(file_name) {
        return Err(Error::invalid_input(format!(
            "input file must have a .nc extension, got '{}'",
            file_name
        )));
    }
    if data.is_empty() {
        return Err(Error::invalid_input("input payload is empty"));
    }

    info!(
        file = file_name,
        size_mb = format!("{:.2}", data.len() as f64 / 1024.0 / 1024.0),
        "converting NetCDF file"
    );

    let dataset = ClassicDataset::from_bytes(Bytes::copy_from_slice(data))?;
    info!(
        dimensions = dataset.dimensions().len(),
        variables = dataset.variables().len(),
        "parsed dataset"
    );

    let rows = tabularizer::tabularize(&dataset, config);
    let (contents, mode, row_count) = if rows.is_empty() {
        warn!("structured path produced no rows; using flat fallback");
        (tabularizer::flatten(&dataset, config), OutputMode::Flat, 0)
    } else {
        let count = rows.len();
        (csv_writer::serialize(&rows), OutputMode::Structured, count)
    };

    let file_name = format!(
        "{}{}",
        nc_suffix().replace(file_name, ""),
        OUTPUT_EXTENSION
    );
    info!(output = %file_name, rows = row_count, "conversion finished");

    Ok(Conversion {
        file_name,
        contents,
        mode,
        row_count,
    })
}

/// Convert a NetCDF file on disk. The file is read fully into memory, as
/// the conversion is a single-pass in-memory transform.
pub fn convert_file(path: &Path, config: &ConverterConfig) -> Result<Conversion> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::invalid_input(format!("unusable input path: {}", path.display())))?;
    let data = std::fs::read(path)
        .map_err(|e| Error::io(format!("could not read {}", path.display()), e))?;
    convert_bytes(file_name, &data, config)
}
