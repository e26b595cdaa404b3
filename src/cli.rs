//! Command-line interface for the xss-sanitizer tool
//!
//! Exposes the sanitizer through clap subcommands:
//!
//! - `html` filters one HTML string
//! - `url` applies the URL policy to one URL
//! - `json` deep-sanitizes a JSON document from a file or stdin
//! - `validate` reports whether a string is already safe
//! - `batch` streams a JSON-lines file through the sanitizer
//!
//! Policy options come from an optional JSON file (`--config`) using the same
//! option names as the library (`allowCommentTag`, `whiteList`, ...).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::FilterOptions;
use crate::sanitize::Sanitizer;

/// Main command-line interface structure
///
/// Global options configure the sanitizer shared by every subcommand.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use xss_sanitizer::cli::{Cli, Commands};
///
/// let cli = Cli::parse_from(["xss-sanitizer", "--extend-defaults", "url", "--url", "example.com", "--protocol-optional"]);
/// assert!(cli.extend_defaults);
/// assert!(matches!(cli.command, Commands::Url { protocol_optional: true, .. }));
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "xss-sanitizer",
    about = "Policy-driven XSS sanitizer for HTML, URLs and JSON documents",
    version
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file with filter options (allowCommentTag, whiteList, ...)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Merge the configured options into the built-in policy instead of
    /// replacing it
    #[arg(long, global = true)]
    pub extend_defaults: bool,
}

impl Cli {
    /// Builds the sanitizer described by the global options
    pub fn sanitizer(&self) -> Result<Sanitizer> {
        match &self.config {
            Some(path) => {
                let options = FilterOptions::from_path(path)
                    .with_context(|| format!("Failed to load configuration from {:?}", path))?;
                Ok(Sanitizer::with_options(options, self.extend_defaults))
            }
            None => Ok(Sanitizer::new()),
        }
    }
}

/// Available subcommands
///
/// ```text
/// xss-sanitizer html --value '<img src=x onerror=alert(1)>'
/// xss-sanitizer url --url example.com --protocol-optional
/// xss-sanitizer json --input-file doc.json --pretty
/// xss-sanitizer batch --input-file posts.jsonl --output-file clean.jsonl
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitize a single HTML string and print the result
    Html {
        /// HTML to sanitize
        #[arg(short, long)]
        value: String,
    },
    /// Apply the URL policy to a single URL
    ///
    /// Prints an empty line when the URL is rejected.
    Url {
        /// URL to check
        #[arg(short, long)]
        url: String,

        /// Complete scheme-less URLs with https:// instead of rejecting them
        #[arg(long)]
        protocol_optional: bool,
    },
    /// Deep-sanitize a JSON document
    Json {
        /// File containing the document; stdin when omitted
        #[arg(short, long)]
        input_file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Report whether a string is already safe
    Validate {
        /// HTML to validate
        #[arg(short, long)]
        value: String,
    },
    /// Sanitize a JSON-lines file, one document per line
    ///
    /// Empty lines and those starting with '#' are skipped. Each document
    /// produces one JSON record with `line`, `isValid`, `sanitized` and
    /// `error` fields.
    Batch {
        /// Input file with one JSON document per line
        #[arg(short, long)]
        input_file: PathBuf,

        /// Output file for records; stdout when omitted
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        /// Number of lines sanitized together
        #[arg(long, default_value = "1000")]
        chunk_size: usize,
    },
}
