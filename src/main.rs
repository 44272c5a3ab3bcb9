use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use smsconv::cli::{handle_error, CliUtils};
use smsconv::{convert_file, ConvertConfig};

const DEFAULT_OUTPUT: &str = "converted.xml";

/// SMS/MMS backup converter
#[derive(Parser, Debug)]
#[command(name = "smsconv")]
#[command(about = "Convert an SMS/MMS backup XML export into normalized SMS-only XML")]
#[command(version = "0.1.0")]
struct CliArgs {
    /// Input backup XML file
    #[arg()]
    input: Option<PathBuf>,

    /// Output file path (default: converted.xml)
    #[arg()]
    output: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Output conversion statistics
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let Some(input) = args.input.clone() else {
        eprintln!("Usage: smsconv <input.xml> [output.xml]");
        std::process::exit(1);
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let config = ConvertConfig {
        quiet: args.quiet,
        ..ConvertConfig::default()
    };

    if !args.quiet {
        println!("Processing {}...", input.display());
    }

    match convert_file(&input, &output, &config) {
        Ok(stats) => {
            CliUtils::show_success(
                &format!(
                    "Converted {} messages to {}",
                    stats.records_emitted,
                    output.display()
                ),
                args.quiet,
            );

            if args.stats && !args.quiet {
                println!("\n{}", stats.summary());
                println!(
                    "({} in, {} out, {})",
                    CliUtils::format_file_size(stats.input_size_bytes),
                    CliUtils::format_file_size(stats.output_size_bytes),
                    CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms)),
                );
            }
            Ok(())
        }
        Err(error) => {
            handle_error(&error);
            std::process::exit(1);
        }
    }
}
