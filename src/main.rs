//! Contributors API - distinct contributor logins for a GitHub repository
//!
//! # Usage
//! ```bash
//! gh-contributors                          # Serve on 127.0.0.1:8080
//! gh-contributors --port 3001              # Serve on a different port
//! gh-contributors --api-url http://mock:80 # Point at a different API host
//! ```

use std::sync::Arc;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gh_contributors::github::GithubClient;
use gh_contributors::resolver::SharedResolver;
use gh_contributors::routes;

/// Contributors API - serve the distinct contributors of GitHub repositories
#[derive(Parser)]
#[command(name = "gh-contributors")]
#[command(about = "HTTP API returning the distinct contributors of a GitHub repository", long_about = None)]
struct Cli {
    /// Port to run the server on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = "https://api.github.com")]
    api_url: String,

    /// Personal access token for authenticated GitHub requests
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = match GithubClient::new(cli.api_url.as_str(), cli.token.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build GitHub client: {}", e);
            std::process::exit(1);
        }
    };
    let resolver: SharedResolver = Arc::new(client);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(resolver)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to port {}: {}", cli.port, e);
            eprintln!("Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, api_url = %cli.api_url, "listening");

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
