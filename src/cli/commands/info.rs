//! Info command implementation
//!
//! Parses a NetCDF file's header and reports its dimensions, variables and
//! attributes without converting any data.

use std::time::Instant;

use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

use super::shared::{ConversionStats, setup_logging};
use crate::app::models::AttrValue;
use crate::app::services::classic_reader::ClassicDataset;
use crate::app::source::DatasetSource;
use crate::cli::args::{InfoArgs, OutputFormat};
use crate::{Error, Result};

/// Serializable report of a file's structure
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    version: String,
    record_count: usize,
    global_attributes: Vec<AttributeReport>,
    dimensions: Vec<DimensionReport>,
    variables: Vec<VariableReport>,
}

#[derive(Debug, Serialize)]
struct DimensionReport {
    name: String,
    size: usize,
    unlimited: bool,
}

#[derive(Debug, Serialize)]
struct VariableReport {
    name: String,
    #[serde(rename = "type")]
    declared_type: String,
    dimensions: Vec<String>,
    attributes: Vec<AttributeReport>,
}

#[derive(Debug, Serialize)]
struct AttributeReport {
    name: String,
    value: serde_json::Value,
}

/// Info command runner
pub fn run_info(args: InfoArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;

    info!("Inspecting {}", args.input.display());
    debug!("Info arguments: {:?}", args);

    args.validate()?;

    let data = std::fs::read(&args.input)
        .map_err(|e| Error::io(format!("could not read {}", args.input.display()), e))?;
    let dataset = ClassicDataset::from_slice(&data)?;
    let report = build_report(&args, &dataset);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::invalid_input(format!("could not render report: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Human => print_human(&report),
    }

    Ok(ConversionStats {
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn build_report(args: &InfoArgs, dataset: &ClassicDataset) -> FileReport {
    let unlimited_name = dataset.unlimited_dimension().map(|d| d.name.clone());

    FileReport {
        file: args.input.display().to_string(),
        version: dataset.version_name().to_string(),
        record_count: dataset.record_count(),
        global_attributes: dataset
            .global_attributes()
            .iter()
            .map(|(name, value)| AttributeReport {
                name: name.clone(),
                value: attr_json(value),
            })
            .collect(),
        dimensions: dataset
            .dimensions()
            .iter()
            .map(|d| DimensionReport {
                name: d.name.clone(),
                size: d.size,
                unlimited: unlimited_name.as_deref() == Some(d.name.as_str()),
            })
            .collect(),
        variables: dataset
            .variables()
            .iter()
            .map(|v| VariableReport {
                name: v.name.clone(),
                declared_type: v.declared_type.clone(),
                dimensions: v.dimensions.clone(),
                attributes: v
                    .attributes
                    .iter()
                    .map(|(name, value)| AttributeReport {
                        name: name.clone(),
                        value: attr_json(value),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn attr_json(value: &AttrValue) -> serde_json::Value {
    match value {
        AttrValue::Text(s) => serde_json::Value::String(s.clone()),
        AttrValue::Numeric(numbers) => serde_json::json!(numbers),
    }
}

fn print_human(report: &FileReport) {
    println!("{} {}", "File:".bold(), report.file);
    println!("{} {}", "Format:".bold(), report.version);
    println!("{} {}", "Records:".bold(), report.record_count);
    for attr in &report.global_attributes {
        println!("  {}: {}", attr.name.as_str().dimmed(), attr.value);
    }
    println!();

    println!("{}", "Dimensions".bold());
    for dim in &report.dimensions {
        if dim.unlimited {
            println!("  {} = {} {}", dim.name, dim.size, "(unlimited)".cyan());
        } else {
            println!("  {} = {}", dim.name, dim.size);
        }
    }
    println!();

    println!("{}", "Variables".bold());
    for var in &report.variables {
        println!(
            "  {} {}({})",
            var.declared_type.as_str().green(),
            var.name,
            var.dimensions.join(", ")
        );
        for attr in &var.attributes {
            println!("    {}: {}", attr.name.as_str().dimmed(), attr.value);
        }
    }
}
