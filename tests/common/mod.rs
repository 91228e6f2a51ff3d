//! Shared utilities for integration tests.

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;

use vanity_imports::config::loader::finalize_config;
use vanity_imports::config::PathConfig;
use vanity_imports::http::PageRenderer;
use vanity_imports::{HttpServer, VanityConfig};

/// Config with an open path and a restricted path under `example.com`.
pub fn vanity_config() -> VanityConfig {
    let mut config = VanityConfig::default();
    config.server.host = "example.com".into();
    config.paths.insert(
        "/pkg/foo".into(),
        PathConfig {
            repo: "https://github.com/acme/foo".into(),
            ..Default::default()
        },
    );
    config.paths.insert(
        "/secret".into(),
        PathConfig {
            repo: "https://git.example.org/secret".into(),
            display: Some("https://git.example.org/secret _ _".into()),
            allows: vec!["198.51.100.0/24".into(), "2001:db8::7".into()],
        },
    );
    finalize_config(config).unwrap()
}

/// Router for `config` that sees every request as coming from `peer`.
#[allow(dead_code)]
pub fn app(config: VanityConfig, peer: &str) -> Router {
    let peer: SocketAddr = peer.parse().unwrap();
    HttpServer::new(config).router().layer(MockConnectInfo(peer))
}

#[allow(dead_code)]
pub fn app_with_renderer(config: VanityConfig, renderer: Arc<dyn PageRenderer>, peer: &str) -> Router {
    let peer: SocketAddr = peer.parse().unwrap();
    HttpServer::with_renderer(config, renderer)
        .router()
        .layer(MockConnectInfo(peer))
}

/// Send an arbitrary request through `app`.
#[allow(dead_code)]
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Send a GET for `path` with the given headers.
#[allow(dead_code)]
pub async fn get(app: Router, path: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// In-memory sink for `tracing_subscriber::fmt` output.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl LogBuffer {
    /// A plain-text subscriber writing into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}
