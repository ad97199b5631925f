use std::sync::Arc;

use color_eyre::eyre::Result;
use dentbook_api::config::ApiConfig;
use dentbook_sheets::SheetsAppender;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Build the Google Sheets appender. Credentials are parsed lazily on the
    // first submission so a misconfigured deployment still boots and reports
    // the problem per request.
    let sink = Arc::new(SheetsAppender::new(
        config.credentials_json.clone(),
        config.sheet_target(),
    ));

    // Start API server
    dentbook_api::start_server(config, sink).await?;

    Ok(())
}
