//! One-shot classification of a product description from the command line.
//!
//! Usage: `classify_product <description...>`

use tariff_classify_api::config::Config;
use tariff_classify_api::handlers::AppState;

/// Main entry point for the one-shot classifier.
///
/// Joins the arguments into a single description, classifies it with the
/// configured upstream and prints the result as pretty JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tariff_classify_api=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let description = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if description.trim().is_empty() {
        anyhow::bail!("usage: classify_product <product description>");
    }

    let config = Config::from_env()?;
    let state = AppState::with_anthropic(config)?;

    let result = state.classifier.classify(&description).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
