use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mythos_keeper::{
    api,
    config::{Config, LogConfig, LogFormat},
    store::InMemoryStore,
};

#[derive(Parser)]
#[command(name = "mythos-keeper")]
#[command(about = "Keeps investigator character sheets in memory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to listen on (overrides MYTHOS_HTTP_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides MYTHOS_HTTP_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Initialize tracing, honouring RUST_LOG over the configured level.
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("mythos_keeper={level},tower_http={level}", level = log.level)
        }),
    );

    match log.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let app = api::create_router(InMemoryStore::new());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    if let Some(Commands::Serve { host, port }) = cli.command {
        if let Some(host) = host {
            config.http.host = host;
        }
        if let Some(port) = port {
            config.http.port = port;
        }
    }

    init_tracing(&config.log);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting mythos-keeper");

    serve(config).await
}
