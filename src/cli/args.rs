//! Command-line argument definitions for the NetCDF converter
//!
//! The complete CLI interface, defined with the clap derive API.

use crate::config::ConverterConfig;
use crate::constants::{MAX_FLAT_VALUES_PER_VARIABLE, MAX_STRUCTURED_ROWS};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the NetCDF-to-CSV converter
///
/// Converts NetCDF classic-format files (CDF-1 and CDF-2) into flat CSV
/// tables, one row per coordinate tuple.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nc2csv",
    version,
    about = "Convert NetCDF classic files to flat CSV tables",
    long_about = "Converts NetCDF classic-format files (CDF-1 and CDF-2) into flat CSV tables \
                  suitable for spreadsheets and data-analysis tools. Multi-dimensional variables \
                  are flattened into one row per coordinate tuple; files without tabularizable \
                  data fall back to a per-variable flat listing."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the converter
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert NetCDF files to CSV (main command)
    Convert(ConvertArgs),
    /// Inspect a NetCDF file's dimensions and variables without converting
    Info(InfoArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input NetCDF file, or a directory to convert recursively
    ///
    /// A directory is walked for files with the .nc extension; each is
    /// converted to a .csv next to it unless --output is given.
    #[arg(value_name = "INPUT", help = "Input .nc file or directory")]
    pub input: PathBuf,

    /// Output path
    ///
    /// For a single input file: the output CSV path. For a directory input:
    /// the directory where output files are written, mirroring the input
    /// file names. Defaults to writing next to each input file.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output file (single input) or directory (directory input)"
    )]
    pub output: Option<PathBuf>,

    /// Maximum number of output rows across all variables
    #[arg(
        long = "max-rows",
        value_name = "COUNT",
        default_value_t = MAX_STRUCTURED_ROWS,
        help = "Maximum number of output rows across all variables"
    )]
    pub max_rows: usize,

    /// Maximum values listed per variable in the flat fallback
    #[arg(
        long = "max-values",
        value_name = "COUNT",
        default_value_t = MAX_FLAT_VALUES_PER_VARIABLE,
        help = "Maximum values listed per variable in the flat fallback"
    )]
    pub max_values: usize,

    /// Decode CF-style time coordinates to ISO-8601 text
    ///
    /// Numeric coordinate variables with a `units = "<unit> since <datetime>"`
    /// attribute are rendered as timestamps instead of raw offsets.
    #[arg(
        long = "decode-times",
        help = "Decode CF-style time coordinates to ISO-8601 text"
    )]
    pub decode_times: bool,

    /// Force overwrite of existing output files
    #[arg(long = "force", help = "Overwrite existing output files")]
    pub force_overwrite: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the info command
#[derive(Debug, Clone, Parser)]
pub struct InfoArgs {
    /// Input NetCDF file to inspect
    #[arg(value_name = "INPUT", help = "Input .nc file")]
    pub input: PathBuf,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for the info report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input.display()
            )));
        }

        if self.max_rows == 0 {
            return Err(Error::configuration(
                "max-rows must be greater than 0".to_string(),
            ));
        }

        if self.max_values == 0 {
            return Err(Error::configuration(
                "max-values must be greater than 0".to_string(),
            ));
        }

        // A file output target only makes sense for a file input
        if self.input.is_dir() {
            if let Some(output) = &self.output {
                if output.exists() && !output.is_dir() {
                    return Err(Error::configuration(format!(
                        "Output must be a directory when input is a directory: {}",
                        output.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Build the conversion configuration from the arguments
    pub fn to_config(&self) -> ConverterConfig {
        ConverterConfig {
            max_rows: self.max_rows,
            max_values_per_variable: self.max_values,
            decode_times: self.decode_times,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InfoArgs {
    /// Validate the info command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        if self.input.is_dir() {
            return Err(Error::configuration(format!(
                "Input must be a file, not a directory: {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
