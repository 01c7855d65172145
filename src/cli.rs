//! CLI argument parsing using clap.

use clap::Parser;

/// `MediQuote` - Health-cost prediction TUI
///
/// Interactive client for the MediQuote prediction backend: estimate your
/// annual medical costs from a health profile, or ask the insurance
/// assistant a question.
#[derive(Parser, Debug)]
#[command(name = "mediquote", version, about, long_about = None)]
pub struct Args {
    /// Base URL of the prediction API
    #[arg(long, default_value = "http://localhost:5000/api")]
    pub api_url: String,
}
