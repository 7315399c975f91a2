use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod util;

use commands::mcp::McpCommands;
use commands::search::SearchArgs;

#[derive(Parser)]
#[command(
    name = "pexels-gallery",
    version,
    about = "Pexels gallery CLI: search photos, inspect tool output, run the MCP server"
)]
struct Cli {
    /// Gallery API base URL (for `health`)
    #[arg(long, env = "PEXELS_GALLERY_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Pexels API base URL (defaults to https://api.pexels.com/v1)
    #[arg(long, env = "PEXELS_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gallery API health
    Health,
    /// Search Pexels and print the tool response envelope
    Search(SearchArgs),
    /// Decode a tool-output JSON document into the gallery state and panel
    Decode {
        /// Read from this file instead of stdin ("-" for stdin)
        #[arg(long)]
        file: Option<String>,
    },
    /// MCP server
    Mcp {
        #[command(subcommand)]
        command: McpCommands,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let base_url = cli.base_url.as_deref();

    let code = match cli.command {
        Commands::Health => commands::health::run(&cli.api_url).await,
        Commands::Search(args) => commands::search::run(base_url, args).await,
        Commands::Decode { file } => commands::decode::run(file.as_deref()),
        Commands::Mcp { command } => commands::mcp::run(base_url, command).await,
    };
    std::process::exit(code);
}
