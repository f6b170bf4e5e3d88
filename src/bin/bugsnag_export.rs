//! Bugsnag event export CLI binary.
//!
//! Resolves an organisation, project, and one or more error ids, then
//! writes the matching events to stdout as CSV or raw JSON.

use std::env;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bugsnag_export::cli::{split_list, Cli};
use bugsnag_export::{
    BugsnagClient, BugsnagError, ExportTarget, Exporter, Result, DEFAULT_API_URL,
};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Pass --api-key or set the BUGSNAG_API_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays clean for CSV and JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> Result<BugsnagClient> {
    let token = match cli.api_key.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => {
            return Err(BugsnagError::ConfigMissing(
                "no API key specified".to_string(),
            ))
        }
    };

    let base_url = env::var("BUGSNAG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    BugsnagClient::new(token, &base_url)
}

async fn run(client: &BugsnagClient, cli: Cli) -> Result<()> {
    let error_ids = split_list([cli.error_ids.as_str()]);

    let target = ExportTarget::resolve(
        client,
        Some(cli.organisation.as_str()),
        &cli.project,
        error_ids,
    )
    .await?;
    let exporter = Exporter::new(client, target);

    let max_events = Some(cli.event_count);

    if cli.raw {
        let events = exporter.events(max_events).await?;
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let columns = split_list(cli.columns.iter().map(String::as_str));
    let csv = exporter
        .export_csv(max_events, &columns, &cli.encodings())
        .await?;
    print!("{csv}");

    Ok(())
}
