//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use legalens_core::ChatProvider;
use legalens_media::UploadPolicy;
use legalens_understanding::DocumentPipeline;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::{analyze_api, chat_api, health_api};

/// Headroom for multipart boundaries and headers above the file ceiling.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: DocumentPipeline,
    pub upload_policy: UploadPolicy,
    pub chat: Arc<dyn ChatProvider>,
}

impl GatewayState {
    pub fn new(pipeline: DocumentPipeline, upload_policy: UploadPolicy, chat: Arc<dyn ChatProvider>) -> Self {
        Self {
            pipeline,
            upload_policy,
            chat,
        }
    }
}

/// Build the `/api` router with CORS and the upload body limit applied.
pub fn router(state: GatewayState, cors_allow_origin: &str) -> Result<Router> {
    let body_limit = state.upload_policy.max_bytes.saturating_add(MULTIPART_OVERHEAD);

    let app = Router::new()
        .route("/api/analyze", post(analyze_api::analyze))
        .route("/api/analyze/stream", post(analyze_api::analyze_stream))
        .route("/api/chat", post(chat_api::chat))
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(cors_allow_origin)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(origin.trim())
            .with_context(|| format!("Invalid CORS origin: {origin}"))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Bind `addr` and serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState, cors_allow_origin: &str) -> Result<()> {
    let app = router(state, cors_allow_origin)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use legalens_chat::MockChat;
    use legalens_core::OcrEngine;
    use legalens_understanding::{Extractor, ProgressGovernor};

    /// OCR stand-in that sleeps, then returns fixed text.
    pub struct ScriptedOcr {
        pub delay: Duration,
        pub text: &'static str,
    }

    #[async_trait]
    impl OcrEngine for ScriptedOcr {
        fn name(&self) -> &str {
            "scripted"
        }
        async fn recognize(&self, _image: &[u8], _language: &str) -> anyhow::Result<String> {
            tokio::time::sleep(self.delay).await;
            Ok(self.text.to_string())
        }
    }

    pub fn state(ocr: ScriptedOcr, timeout: Duration, chat: MockChat) -> GatewayState {
        GatewayState::new(
            DocumentPipeline::new(Extractor::new(Arc::new(ocr)), ProgressGovernor::new(timeout)),
            UploadPolicy::new(1024),
            Arc::new(chat),
        )
    }

    pub fn default_state() -> GatewayState {
        state(
            ScriptedOcr {
                delay: Duration::ZERO,
                text: "This agreement may be terminated by either party.",
            },
            Duration::from_secs(5),
            MockChat::new("mock"),
        )
    }

    /// Serve on an ephemeral port and return the base URL.
    pub async fn spawn(state: GatewayState) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state, "*").unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn rejects_invalid_cors_origin() {
        assert!(router(default_state(), "bad\norigin").is_err());
        assert!(router(default_state(), "https://app.example.com").is_ok());
    }

    #[tokio::test]
    async fn preflight_allows_configured_origin() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(default_state(), "https://app.example.com").unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let resp = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/analyze"))
            .header("Origin", "https://app.example.com")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(
            resp.headers()["access-control-allow-origin"],
            "https://app.example.com"
        );
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let base = spawn(default_state()).await;
        let resp = reqwest::get(format!("{base}/api/nope")).await.unwrap();
        assert_eq!(resp.status(), 404);
    }
}
