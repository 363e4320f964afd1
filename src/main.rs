use clap::Parser;
use nc2csv::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("nc2csv - NetCDF to CSV Converter");
    println!("================================");
    println!();
    println!("Convert NetCDF classic-format files (CDF-1 and CDF-2) into flat CSV");
    println!("tables, one row per coordinate tuple.");
    println!();
    println!("USAGE:");
    println!("    nc2csv <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert NetCDF files to CSV (main command)");
    println!("    info        Inspect a file's dimensions and variables");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    nc2csv convert data.nc");
    println!("    nc2csv convert ./archive -o ./csv --decode-times");
    println!("    nc2csv info data.nc --format json");
    println!();
    println!("Run 'nc2csv help <command>' for detailed command options.");
}
