//! Shared components for CLI commands
//!
//! Common reporting types, logging setup, and input discovery used by more
//! than one subcommand.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::Result;
use crate::constants::INPUT_EXTENSION;

/// Conversion statistics for reporting across commands
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Number of files converted successfully
    pub files_converted: usize,
    /// Number of files that failed to convert
    pub files_failed: usize,
    /// Rows emitted by structured conversions
    pub rows_written: usize,
    /// Number of files that used the flat fallback
    pub fallbacks_used: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ConversionStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging to stderr at the requested level
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nc2csv={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Discover convertible files under a path: the file itself, or every file
/// with the input extension below a directory, in sorted traversal order.
pub fn discover_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && has_input_extension(entry.path()) {
            inputs.push(entry.into_path());
        }
    }
    Ok(inputs)
}

fn has_input_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_ascii_lowercase().ends_with(INPUT_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(ConversionStats::format_size(512), "512 B");
        assert_eq!(ConversionStats::format_size(2048), "2.00 KB");
        assert_eq!(ConversionStats::format_size(1_572_864), "1.50 MB");
    }

    #[test]
    fn test_discover_inputs_walks_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(temp_dir.path().join("b.nc"), b"").unwrap();
        std::fs::write(temp_dir.path().join("a.NC"), b"").unwrap();
        std::fs::write(nested.join("c.nc"), b"").unwrap();
        std::fs::write(temp_dir.path().join("skip.txt"), b"").unwrap();

        let inputs = discover_inputs(temp_dir.path()).unwrap();
        let names: Vec<&str> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.NC", "b.nc", "c.nc"]);
    }

    #[test]
    fn test_discover_inputs_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("one.nc");
        std::fs::write(&file, b"").unwrap();

        let inputs = discover_inputs(&file).unwrap();
        assert_eq!(inputs, vec![file]);
    }
}
