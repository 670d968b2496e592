//! HTTP surface: the upload page, its assets and the generation endpoint.

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::StudioConfig;
use crate::constants::{REQUEST_BODY_LIMIT_BYTES, STYLIZE_PATH};
use crate::openai::ImagesClient;

mod stylize;
mod views;

pub use stylize::{StylizeMeta, StylizeResponse};
use stylize::stylize_handler;
use views::IndexTemplate;

/// Shared, read-only state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<StudioConfig>,
    images: ImagesClient,
}

impl AppState {
    /// Builds the state, including the upstream client, from a config.
    pub fn new(config: StudioConfig) -> Self {
        let images = ImagesClient::new(config.openai_base_url.clone(), config.image_model.clone());
        Self {
            config: Arc::new(config),
            images,
        }
    }
}

async fn root_handler(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate::new(state.config.api_key().is_some())
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn script_handler() -> impl IntoResponse {
    const SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/app.js"));
    ([(CONTENT_TYPE, "text/javascript")], SCRIPT)
}

/// Router with every route, ready to serve.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(root_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/static/app.js", axum::routing::get(script_handler))
        .route(STYLIZE_PATH, axum::routing::post(stylize_handler))
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Binds the listener and serves until Ctrl-C.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    config: StudioConfig,
) -> Result<(), anyhow::Error> {
    if config.api_key().is_none() {
        error!("No OpenAI API key configured, generation requests will fail until OPENAI_API_KEY is set");
    }
    let app = create_router(AppState::new(config));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(api_key: Option<&str>) -> Router {
        create_router(AppState::new(StudioConfig {
            openai_api_key: api_key.map(str::to_string),
            ..Default::default()
        }))
    }

    async fn read_body(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[tokio::test]
    async fn homepage_renders_form_with_limits() {
        let app = test_app(Some("sk-test"));
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("Sackboy Studio"));
        assert!(body.contains("image/png,image/jpeg,image/webp"));
        assert!(body.contains("data-max-bytes=\"8388608\""));
        assert!(body.contains("data-endpoint=\"/api/stylize\""));
        assert!(body.contains("<option value=\"1024\" selected>1024×1024</option>"));
        assert!(body.contains("<option value=\"medium\" selected>Medium</option>"));
        assert!(!body.contains("API key is not configured"));
    }

    #[tokio::test]
    async fn homepage_warns_without_key() {
        let app = test_app(None);
        let request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = read_body(response).await;
        assert!(body.contains("API key is not configured"));
    }

    #[tokio::test]
    async fn static_assets_have_content_types() {
        for (uri, content_type) in [
            ("/static/styles.css", "text/css"),
            ("/static/app.js", "text/javascript"),
        ] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = test_app(None).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), content_type);
            assert!(!read_body(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn stylize_only_accepts_post() {
        let request = Request::builder()
            .method("GET")
            .uri(STYLIZE_PATH)
            .body(Body::empty())
            .unwrap();
        let response = test_app(Some("sk-test")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
