//! FoodSwap
//!
//! An MCP server for food lookup and healthier alternatives.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use foodswap::build_info;
use foodswap::config::Config;
use foodswap::mcp::FoodSwapService;
use foodswap::source::{build_source, BackendClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodswap=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;
    eprintln!("Backend: {}", config.backend_url);
    eprintln!("Food source: {}", config.food_source.as_str());

    let curated = config.curated_terms()?;
    let client = BackendClient::new(&config.backend_url, config.http_timeout, config.session_cookie.clone())?;
    let source = build_source(
        config.food_source,
        client.clone(),
        curated,
        config.page_size,
        config.alternative_page_size,
    );

    // Create the FoodSwap service
    let service = FoodSwapService::new(source, client);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
