//! Console helpers: progress display and user-facing messages

use std::time::Duration;

use crate::error::ConvertError;

/// CLI utility helpers
pub struct CliUtils;

impl CliUtils {
    /// Create a progress spinner for the streaming pass
    ///
    /// The element total is unknown up front (streaming input), so this is
    /// a spinner with a running count and rate rather than a bar.
    pub fn create_spinner() -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} messages ({per_sec})")
                .unwrap(),
        );
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", console::style("✓").green(), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", console::style("✗").red(), message);
    }

    /// Check if progress output makes sense (stderr is a terminal)
    pub fn stderr_is_terminal() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
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
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConvertError) {
    CliUtils::show_error(&error.user_message());

    match error {
        ConvertError::InputNotFound { .. } => {
            eprintln!("\nTip: check the input path; the first argument must be an existing backup XML file");
        }
        ConvertError::MalformedXml { .. } => {
            eprintln!("\nTip: the input must be a well-formed XML backup export");
        }
        ConvertError::OutputWrite { .. } => {
            eprintln!("\nTip: check that the output directory exists and is writable");
        }
    }

    eprintln!("\nTry 'smsconv --help' for usage information.");
}
