//! Convert command implementation
//!
//! Converts a single NetCDF file, or every NetCDF file below a directory,
//! writing CSV output with progress reporting and a summary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use super::shared::{ConversionStats, discover_inputs, setup_logging};
use crate::cli::args::ConvertArgs;
use crate::converter::{self, Conversion, OutputMode};
use crate::{Error, Result};

/// Convert command runner
pub fn run_convert(args: ConvertArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting NetCDF conversion");
    debug!("Convert arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();

    let inputs = discover_inputs(&args.input)?;
    if inputs.is_empty() {
        return Err(Error::invalid_input(format!(
            "no .nc files found under {}",
            args.input.display()
        )));
    }
    info!("Converting {} file(s)", inputs.len());

    let progress_bar = if args.show_progress() && inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut stats = ConversionStats::default();
    let single_input = inputs.len() == 1 && args.input.is_file();

    for input in &inputs {
        if let Some(pb) = &progress_bar {
            pb.set_message(format!(
                "Converting {}",
                input.file_name().unwrap_or_default().to_string_lossy()
            ));
        }

        match convert_one(input, &args, &config, single_input) {
            Ok((output_path, conversion)) => {
                stats.files_converted += 1;
                stats.rows_written += conversion.row_count;
                if conversion.mode == OutputMode::Flat {
                    stats.fallbacks_used += 1;
                }
                stats.output_sizes.push((
                    output_path.display().to_string(),
                    conversion.contents.len() as u64,
                ));
            }
            Err(e) => {
                error!("Failed to convert {}: {}", input.display(), e);
                stats.files_failed += 1;

                // A single explicit input failing is fatal; batch runs
                // carry on and report at the end.
                if single_input {
                    return Err(e);
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Conversion complete");
    }

    stats.processing_time = start_time.elapsed();
    if !args.quiet {
        print_summary(&stats);
    }
    Ok(stats)
}

fn convert_one(
    input: &Path,
    args: &ConvertArgs,
    config: &crate::config::ConverterConfig,
    single_input: bool,
) -> Result<(PathBuf, Conversion)> {
    let conversion = converter::convert_file(input, config)?;
    let output_path = output_path_for(input, &conversion.file_name, args, single_input);

    if output_path.exists() && !args.force_overwrite {
        return Err(Error::configuration(format!(
            "Output file already exists (use --force to overwrite): {}",
            output_path.display()
        )));
    }
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("could not create {}", parent.display()), e))?;
        }
    }

    std::fs::write(&output_path, &conversion.contents)
        .map_err(|e| Error::io(format!("could not write {}", output_path.display()), e))?;
    info!(
        "Wrote {} ({} rows)",
        output_path.display(),
        conversion.row_count
    );

    Ok((output_path, conversion))
}

/// Resolve where one conversion result should be written.
///
/// Single file input: --output names the file directly, otherwise the CSV
/// lands next to the input. Directory input: --output names a directory the
/// outputs land in, otherwise each CSV lands next to its source file.
fn output_path_for(
    input: &Path,
    output_name: &str,
    args: &ConvertArgs,
    single_input: bool,
) -> PathBuf {
    match &args.output {
        Some(output) if single_input => output.clone(),
        Some(output) => output.join(output_name),
        None => input.with_file_name(output_name),
    }
}

fn print_summary(stats: &ConversionStats) {
    println!();
    println!("{}", "Conversion Summary".bold());
    println!("{}", "==================".bold());
    println!(
        "  Files converted:  {}",
        stats.files_converted.to_string().green()
    );
    if stats.files_failed > 0 {
        println!(
            "  Files failed:     {}",
            stats.files_failed.to_string().red()
        );
    }
    println!("  Rows written:     {}", stats.rows_written);
    if stats.fallbacks_used > 0 {
        println!(
            "  Flat fallbacks:   {}",
            stats.fallbacks_used.to_string().yellow()
        );
    }
    println!(
        "  Output size:      {}",
        ConversionStats::format_size(stats.total_output_size())
    );
    println!(
        "  Elapsed:          {}",
        HumanDuration(stats.processing_time)
    );
}
