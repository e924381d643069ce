use anyhow::Result;
use axum::Router;
use clap::Parser;
use search_core::SearchConfig;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Index file path
    #[arg(long, default_value = "./index.json")]
    index: String,
    /// Folder holding the documents
    #[arg(long, default_value = "./data")]
    data: String,
    /// Snippet length in characters
    #[arg(long, default_value_t = 160)]
    snippet_len: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        index_path: args.index,
        data_dir: args.data,
        search: SearchConfig { snippet_len: args.snippet_len, ..SearchConfig::default() },
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
