//! clap definitions for the bugsnag-export binary.
//!
//! This module provides the command-line interface structure for the
//! bugsnag-export binary.

use clap::Parser;

use crate::output::ValueEncodings;

/// Export Bugsnag error events as CSV.
#[derive(Parser, Debug)]
#[command(
    name = "bugsnag-export",
    about = "Exports Bugsnag error events as a CSV including specified metadata",
    version
)]
pub struct Cli {
    /// Organisation id or slug. An empty string selects the first
    /// organisation on the account.
    pub organisation: String,

    /// Project id or slug.
    pub project: String,

    /// Error id(s) whose events to export. Comma-separated lists are
    /// supported and deduplicated.
    pub error_ids: String,

    /// Additional columns to add to the CSV. Access nested data using dot
    /// syntax; rename columns in the output using "path:name" syntax.
    #[arg(short = 'c', long = "column", value_name = "PATH[:NAME]")]
    pub columns: Vec<String>,

    /// Maximum number of events to return per error.
    #[arg(short = 'e', long, default_value_t = 100, value_name = "COUNT")]
    pub event_count: usize,

    /// Bugsnag API key. The BUGSNAG_API_KEY env var is used if not specified.
    #[arg(short = 'k', long, env = "BUGSNAG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output raw events as pretty-printed JSON instead of CSV. Useful for
    /// inspecting the metadata structure.
    #[arg(short = 'r', long)]
    pub raw: bool,

    /// Value to use when a column path is not set on an event. Defaults to
    /// the null value.
    #[arg(short = 'x', long, value_name = "VALUE")]
    pub not_set_value: Option<String>,

    /// Value to use for null values.
    #[arg(short = 'z', long, default_value = "", value_name = "VALUE")]
    pub null_value: String,

    /// Value to use for true values.
    #[arg(short = 't', long, default_value = "true", value_name = "VALUE")]
    pub true_value: String,

    /// Value to use for false values.
    #[arg(short = 'f', long, default_value = "false", value_name = "VALUE")]
    pub false_value: String,
}

impl Cli {
    /// Assemble the value encodings from the flags.
    ///
    /// The not-set value falls back to the null value when not given, so
    /// `-z` alone changes how both render.
    pub fn encodings(&self) -> ValueEncodings {
        ValueEncodings {
            not_set: self
                .not_set_value
                .clone()
                .unwrap_or_else(|| self.null_value.clone()),
            true_value: self.true_value.clone(),
            false_value: self.false_value.clone(),
            null_value: self.null_value.clone(),
        }
    }
}

/// Split comma-separated entries, dropping empty strings and duplicates
/// while preserving first-seen order.
pub fn split_list<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        for entry in value.split(',') {
            if entry.is_empty() {
                continue;
            }
            if !out.iter().any(|existing| existing == entry) {
                out.push(entry.to_string());
            }
        }
    }
    out
}
