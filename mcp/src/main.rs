use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pexels_gallery_mcp_runtime::{McpCommands, run as run_mcp};

#[derive(Parser)]
#[command(
    name = "pexels-gallery-mcp",
    version,
    about = "Pexels gallery MCP server over stdio"
)]
struct Cli {
    /// Pexels API base URL (defaults to https://api.pexels.com/v1)
    #[arg(long, env = "PEXELS_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: McpCommands,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pexels_gallery_mcp_runtime=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let code = run_mcp(cli.base_url.as_deref(), cli.command).await;
    std::process::exit(code);
}
