//! Commit statistics server.
//!
//! # Usage
//! ```bash
//! GITHUB_OA2=<token> wonder              # Start on the default port
//! wonder --port 9090 --max-concurrency 8
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wonder::config::Config;
use wonder::github::GitHubClient;
use wonder::pipeline::Wonder;
use wonder::routes;

/// Aggregate per-author commit statistics for GitHub repositories.
#[derive(Parser)]
#[command(name = "wonder")]
#[command(about = "Per-author commit statistics over the GitHub API", long_about = None)]
struct Cli {
    /// Port to run the server on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// GitHub OAuth2 token; unauthenticated requests are heavily rate limited
    #[arg(long, env = "GITHUB_OA2", hide_env_values = true)]
    token: Option<String>,

    /// Max in-flight upstream calls per pipeline stage
    #[arg(long, env = "MAX_CONCURRENCY", default_value_t = 20)]
    max_concurrency: usize,

    /// Lookback window in days
    #[arg(long, env = "SINCE_DAYS", default_value_t = 45)]
    since_days: i64,

    /// Per-request deadline in seconds (0 disables it)
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config {
        token: cli.token,
        page_concurrency: cli.max_concurrency,
        detail_concurrency: cli.max_concurrency,
        since_days: cli.since_days,
        request_timeout: (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs)),
        ..Config::default()
    }
    .validate()?;

    let client = GitHubClient::new(config.token.as_deref())?;
    let state = Arc::new(Wonder::new(client, config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("wonder listening on http://{addr}");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        println!("\nShutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
