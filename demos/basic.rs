//! Basic example demonstrating the Bugsnag export client.
//!
//! Run with:
//! ```
//! BUGSNAG_API_KEY=your-key cargo run --example basic
//! ```

use std::env;

use bugsnag_export::{
    get_organisations, get_projects, BugsnagClient, ExportTarget, Exporter, ValueEncodings,
};

#[tokio::main]
async fn main() -> bugsnag_export::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Bugsnag client...");
    let client = BugsnagClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List organisations the token can see
    println!("\n--- Listing Organisations ---");
    let organisations = get_organisations(&client).await?;
    println!("Found {} organisations", organisations.len());

    for organisation in &organisations {
        let name = organisation.name.as_deref().unwrap_or(&organisation.slug);
        println!("  - {} ({})", name, organisation.id);
    }

    // Drill into the first organisation
    if let Some(organisation) = organisations.first() {
        println!("\n--- Listing Projects for '{}' ---", organisation.slug);
        let projects = get_projects(&client, &organisation.id).await?;
        println!("Found {} projects", projects.len());

        for project in projects.iter().take(10) {
            let name = project.name.as_deref().unwrap_or(&project.slug);
            println!("  - {} ({})", name, project.id);
        }

        // Error ids come from the Bugsnag UI; there is no listing endpoint
        // for them here. Set BUGSNAG_DEMO_ERROR_ID to try the export path.
        if let (Some(project), Ok(error_id)) =
            (projects.first(), env::var("BUGSNAG_DEMO_ERROR_ID"))
        {
            println!("\n--- Exporting events for error {} ---", error_id);
            let target = ExportTarget::resolve(
                &client,
                Some(organisation.id.as_str()),
                &project.id,
                vec![error_id],
            )
            .await?;

            let csv = Exporter::new(&client, target)
                .export_csv(
                    Some(5),
                    &["exceptions.0.errorClass:error_class".to_string()],
                    &ValueEncodings::default(),
                )
                .await?;
            print!("{csv}");
        }
    }

    println!("\nDone!");
    Ok(())
}
