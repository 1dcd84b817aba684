//! Standalone web server binary
//!
//! Usage: cargo run -p blackjack_web --bin blackjack-web-server -- --port 8080

use blackjack_web::{init_logging, LogFormat, ServerConfig, WebServer};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "blackjack-web-server",
    about = "Play Blackjack in the browser",
    version
)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind to
    #[arg(long, short = 'p', default_value_t = 8080)]
    port: u16,
    /// Directory holding index.html and its assets
    #[arg(long, short = 'd')]
    static_dir: Option<PathBuf>,
    /// Minutes a table may sit idle before it is closed
    #[arg(long, default_value_t = 30)]
    session_ttl_mins: u64,
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    init_logging(if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    })?;

    let static_dir = match args.static_dir {
        Some(dir) => dir,
        None => find_static_dir()?,
    };

    let config = ServerConfig::new(args.host, args.port, static_dir)
        .with_session_ttl(Duration::from_secs(args.session_ttl_mins * 60));
    tracing::info!(
        host = config.host(),
        port = config.port(),
        static_dir = %config.static_dir().display(),
        "starting blackjack web server"
    );

    let handle = WebServer::new(config)?.start().await?;
    println!("Blackjack table at http://{}  (Ctrl+C to stop)", handle.address());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    handle.shutdown().await?;
    Ok(())
}

/// Looks for `static/` from the workspace root or the crate directory.
fn find_static_dir() -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let current_dir = std::env::current_dir()?;
    let candidates = [
        current_dir.join("rust").join("web").join("static"),
        current_dir.join("static"),
    ];
    candidates
        .iter()
        .find(|p| p.is_dir())
        .cloned()
        .ok_or_else(|| {
            "could not find static directory (tried rust/web/static and static); pass --static-dir"
                .into()
        })
}
