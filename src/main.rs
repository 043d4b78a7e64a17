//! Blog API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ axum + tower-http ──▶ routing::Router ──▶ params::binder ──▶ handler
//!                    (request id, trace,   (ordered scan,      (coerce, validate,   (synthetic
//!                     timeout, body limit)  first match wins)   defaults)            JSON)
//!     ◀───────────── http::response ◀──────────────────────────────────────────────────┘
//!                    (200 / 404 / 422 JSON)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use blog_api::config::{load_config, override_bind_address, ApiConfig, ConfigError};
use blog_api::observability::{logging, metrics};
use blog_api::routing::RouterOptions;
use blog_api::{blog, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(about = "Blog API demonstrating ordered routing and parameter validation", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print the route table in declaration order
    Routes,
}

fn load(cli: &Cli) -> Result<ApiConfig, ConfigError> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ApiConfig::default(),
    };
    match &cli.bind {
        Some(bind) => override_bind_address(config, bind),
        None => Ok(config),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(&config.observability.log_filter);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Routes => print_routes(&config)?,
        Commands::Serve => serve(config).await?,
    }
    Ok(())
}

fn print_routes(config: &ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = blog::router(RouterOptions {
        reject_shadowed: config.routing.reject_shadowed_routes,
    })?;

    for compiled in router.routes() {
        let route = compiled.route();
        println!("{:<6} {:<34} {}", route.method.as_str(), route.pattern, route.name);
        for param in compiled.params() {
            println!("         {}", param.spec().summary());
        }
        if let Some(body) = &route.body {
            println!("         body: {}", body.type_name);
        }
    }
    for shadowed in router.shadowed() {
        let kind = if shadowed.partial { "partially shadowed" } else { "unreachable" };
        println!("{}: {} (shadowed by {})", kind, shadowed.route, shadowed.by);
    }
    Ok(())
}

async fn serve(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("blog-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_flag_overrides_default() {
        let cli = Cli::try_parse_from(["blog-api", "--bind", "127.0.0.1:9100", "routes"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Routes)));
        assert_eq!(load(&cli).unwrap().listener.bind_address, "127.0.0.1:9100");
    }

    #[test]
    fn test_invalid_bind_flag_is_rejected() {
        let cli = Cli::try_parse_from(["blog-api", "--bind", "nowhere"]).unwrap();
        assert!(matches!(load(&cli), Err(ConfigError::Validation(_))));
    }
}
