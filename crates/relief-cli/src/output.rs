//! Result printing helpers for text and JSON output modes.

use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable result. In JSON mode this is the only stdout output
/// a command produces; in text mode commands print their own summaries.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Json => {
            // JSON output ignores --quiet: it is the command's result.
            match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("failed to serialize result: {}", e),
            }
        }
        OutputFormat::Text => {
            if !quiet {
                match serde_json::to_string_pretty(value) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("failed to serialize result: {}", e),
                }
            }
        }
    }
}

/// Print an informational progress line (text mode only).
pub fn info(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Text = format {
        println!("{} {}", "•".cyan(), message);
    }
}

/// Print a success line (text mode only).
pub fn success(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Text = format {
        println!("{} {}", "✓".green().bold(), message);
    }
}
