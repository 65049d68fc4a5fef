//! Static host for the wasm build of the pointer trailer.

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
    routing,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST: &str = "../dist";

/// Where to listen and what to serve, from `PORT` and `DIST_DIR`
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerConfig {
    port: u16,
    dist: PathBuf,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_vars(std::env::var("PORT").ok(), std::env::var("DIST_DIR").ok())
    }

    fn from_vars(port: Option<String>, dist: Option<String>) -> Self {
        let port = match port.as_deref().map(str::parse::<u16>) {
            Some(Ok(port)) => port,
            Some(Err(err)) => {
                tracing::warn!("Ignoring PORT ({err}), using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
            None => DEFAULT_PORT,
        };
        let dist = PathBuf::from(dist.unwrap_or_else(|| DEFAULT_DIST.to_string()));
        Self { port, dist }
    }

    fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

async fn healthz() -> &'static str {
    "ok"
}

fn router(config: &ServerConfig) -> Router {
    // Unknown paths fall back to the page so the trailer always loads
    let index = config.dist.join("index.html");
    let static_files = ServeDir::new(&config.dist).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/healthz", routing::get(healthz))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new().br(true).gzip(true))
                .layer(middleware::from_fn(cache_control)),
        )
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let addr = config.addr();
    tracing::info!("Serving {} on http://{addr}", config.dist.display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(&config)).await
}

async fn cache_control(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut res = next.run(req).await;

    res.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_policy(&path)),
    );
    res
}

/// Page always revalidates; hashed bundles (wasm/js/css) cache forever
fn cache_policy(path: &str) -> &'static str {
    if path == "/" || path.ends_with(".html") {
        "no-cache, must-revalidate"
    } else if is_fingerprinted_asset(path) {
        "public, max-age=31536000, immutable"
    } else {
        "public, max-age=0, must-revalidate"
    }
}

/// `name.<hex hash>.ext`, hash at least 8 hex digits
fn is_fingerprinted_asset(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    let parts: Vec<&str> = file.split('.').collect();

    match parts.as_slice() {
        [_, hash, _, ..] => hash.len() >= 8 && hash.chars().all(|c| c.is_ascii_hexdigit()),
        _ => false,
    }
}
