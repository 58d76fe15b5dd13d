//! sigoracle server - SigV4 signing oracle.
//!
//! Holds a long-term secret and signs caller-built SigV4 strings to sign, so
//! browser uploaders can presign requests without ever seeing the secret.
//!
//! # Usage
//!
//! ```text
//! SIGNING_SECRET=... GATEWAY_LISTEN=0.0.0.0:8080 sigoracle-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SIGNING_SECRET` | *(required)* | Signing secret (falls back to `AWS_SECRET`, then `AWS_SECRET_ACCESS_KEY`) |
//! | `GATEWAY_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `SIGN_PATH` | `/sign_auth` | Signing endpoint path |
//! | `MAX_STRING_TO_SIGN_SIZE` | `65536` | Byte cap on `tosign` |
//! | `MAX_SCOPE_FIELD_LENGTH` | `256` | Byte cap on `region`, `service`, `scope` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Any of these may also come from a `.env` file in the working directory (or
//! a parent). Process environment variables take precedence over the file, and
//! a missing file is not an error.

use std::collections::HashMap;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use sigoracle_auth::SecretSigner;
use sigoracle_core::{OracleConfig, load_secret};
use sigoracle_http::request::RequestLimits;
use sigoracle_http::{OracleHttpService, SignHttpConfig};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read `.env` from the working directory or its parents.
///
/// A missing file yields no values; an unreadable or malformed one is an error.
fn load_dotenv() -> Result<HashMap<String, String>> {
    match dotenvy::dotenv_iter() {
        Ok(iter) => collect_dotenv(iter),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e).context("failed to open .env file"),
    }
}

fn collect_dotenv(
    entries: impl Iterator<Item = dotenvy::Result<(String, String)>>,
) -> Result<HashMap<String, String>> {
    entries
        .collect::<Result<HashMap<_, _>, _>>()
        .context("failed to parse .env file")
}

/// Resolve a variable from `process` first, then from the `.env` values.
fn layered_lookup<'a>(
    process: impl Fn(&str) -> Option<String> + 'a,
    dotenv: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| process(key).or_else(|| dotenv.get(key).cloned())
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str, rust_log: Option<String>) -> Result<()> {
    let filter = match rust_log {
        Some(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid RUST_LOG filter: {directives}"))?,
        None => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`SignHttpConfig`] from the application [`OracleConfig`].
fn build_http_config(config: &OracleConfig) -> SignHttpConfig {
    SignHttpConfig {
        sign_path: config.sign_path.clone(),
        limits: RequestLimits {
            max_string_to_sign_size: config.max_string_to_sign_size,
            max_scope_field_length: config.max_scope_field_length,
        },
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: OracleHttpService<SecretSigner>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Perform a health check by connecting to the server and requesting the health endpoint.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = load_dotenv()?;
    let lookup = layered_lookup(|key| std::env::var(key).ok(), &dotenv);

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let config = OracleConfig::from_lookup(&lookup);
        let addr = config.gateway_listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let config = OracleConfig::from_lookup(&lookup);

    init_tracing(
        &config.log_level,
        lookup("RUST_LOG").filter(|v| !v.is_empty()),
    )?;

    if !dotenv.is_empty() {
        info!(entries = dotenv.len(), "loaded .env file");
    }

    // Refuse to start without a secret rather than sign with an empty key.
    let secret = load_secret(&lookup).context("cannot start without a signing secret")?;

    info!(
        gateway_listen = %config.gateway_listen,
        sign_path = %config.sign_path,
        max_string_to_sign_size = config.max_string_to_sign_size,
        version = VERSION,
        "starting sigoracle server",
    );

    let service = OracleHttpService::new(SecretSigner::new(secret), build_http_config(&config));

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
