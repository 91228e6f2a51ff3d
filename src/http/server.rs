//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the vanity handler on every path
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Map routing decisions onto HTTP responses

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::VanityConfig;
use crate::http::render::{PageRenderer, VanityPage};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::observability::metrics;
use crate::routing::{RouteDecision, VanityRouter};

/// Body sent with every render failure; details stay in the server log.
pub const RENDER_ERROR_BODY: &str = "cannot render template\n";

/// Body sent for unknown import paths.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<VanityRouter>,
    pub renderer: Arc<dyn PageRenderer>,
}

/// HTTP server for the vanity import paths.
pub struct HttpServer {
    router: Router,
    config: VanityConfig,
}

impl HttpServer {
    /// Create a new HTTP server rendering the standard vanity page.
    pub fn new(config: VanityConfig) -> Self {
        let renderer = Arc::new(VanityPage::new(config.server.doc_viewer_url.clone()));
        Self::with_renderer(config, renderer)
    }

    /// Create a new HTTP server with a custom page renderer.
    pub fn with_renderer(config: VanityConfig, renderer: Arc<dyn PageRenderer>) -> Self {
        let vanity_router = Arc::new(VanityRouter::from_config(&config));
        tracing::info!(paths = config.paths.len(), "Import path table compiled");

        let state = AppState {
            router: vanity_router,
            renderer,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &VanityConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(vanity_handler))
            .route("/", any(vanity_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The configured Axum router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            host = %self.config.server.host,
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serves every request: 404 for unknown paths, a redirect for denied
/// clients, the vanity page otherwise.
async fn vanity_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id();
    let span = tracing::info_span!("vanity_request", request_id = %request_id);
    let _entered = span.enter();

    // Paths are matched decoded; undecodable ones cannot be configured keys.
    let Ok(path) = urlencoding::decode(request.uri().path()) else {
        metrics::record_request(metrics::Outcome::NotFound, start_time);
        return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
    };

    tracing::debug!(method = %request.method(), path = %path, "Routing request");

    match state.router.route(&path, request.headers(), &peer.to_string()) {
        RouteDecision::NotFound => {
            metrics::record_request(metrics::Outcome::NotFound, start_time);
            (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
        }
        RouteDecision::Denied { redirect_to, .. } => {
            metrics::record_request(metrics::Outcome::Denied, start_time);
            (StatusCode::FOUND, [(header::LOCATION, redirect_to)]).into_response()
        }
        RouteDecision::Permit(input) => match state.renderer.render(&input) {
            Ok(page) => {
                metrics::record_request(metrics::Outcome::Found, start_time);
                Html(page).into_response()
            }
            Err(e) => {
                tracing::error!(
                    path = %path,
                    error = %e,
                    "Failed to render vanity page"
                );
                metrics::record_request(metrics::Outcome::RenderError, start_time);
                (StatusCode::INTERNAL_SERVER_ERROR, RENDER_ERROR_BODY).into_response()
            }
        },
    }
}
