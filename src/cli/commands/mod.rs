//! Command implementations for the converter CLI
//!
//! Each subcommand lives in its own module; this module dispatches based on
//! the parsed arguments and defines the shared reporting types.

pub mod convert;
pub mod info;
pub mod shared;

pub use shared::ConversionStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner; dispatches to the subcommand handlers.
pub fn run(args: Args) -> Result<ConversionStats> {
    match args.get_command() {
        Commands::Convert(convert_args) => convert::run_convert(convert_args),
        Commands::Info(info_args) => info::run_info(info_args),
    }
}
