//! HTTP server for crawler previews.
//!
//! Provides the preview endpoint using:
//! - Axum for HTTP server
//! - `tower-http` tracing for per-request spans
//! - An injected [`EventSource`] for event lookups
//!
//! Crawlers get a rendered HTML page; every other client is redirected to the
//! same logical path on the SPA.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Url;
use tower_http::trace::TraceLayer;

use crate::client::EventSource;
use crate::config::{ServerConfig, SiteConfig};
use crate::crawler::is_crawler;
use crate::description::build_description;
use crate::errors::PreviewError;
use crate::models::EventRecord;
use crate::render::{PageKind, RenderContext, render};
use crate::routes::{Route, default_page, resolve, static_page};
use crate::urls::{image_url, on_origin, parse_origin};

/// Browser and CDN cache lifetime for rendered previews.
pub const CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

/// Query parameter carrying the logical path.
const PATH_PARAM: &str = "path";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// Event lookups for `/eventos/<id>` previews
    events: Arc<dyn EventSource>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, events: Arc<dyn EventSource>) -> Self {
        Self {
            config: Arc::new(config),
            events,
        }
    }
}

/// Outcome of handling one preview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Send a human to the SPA
    Redirect(String),
    /// Serve rendered HTML to a crawler
    Html(String),
}

impl IntoResponse for Preview {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(location) => match HeaderValue::from_str(&location) {
                Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            },
            Self::Html(html) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                    (header::CACHE_CONTROL, CACHE_CONTROL),
                ],
                html,
            )
                .into_response(),
        }
    }
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(preview_handler))
        .route("/health", get(health_handler))
        .route("/robots.txt", get(robots_handler))
        // Deployments may mount the responder under a prefix.
        .fallback(preview_handler)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("preview server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Preview pipeline
// ============================================================================

/// Decide how to answer a request for `url` from `user_agent`.
///
/// `origin` is the SPA origin without a trailing slash; `url` is the full
/// request URL, whose `path` query parameter names the logical page.
///
/// # Errors
///
/// Returns [`PreviewError::MalformedUrl`] if `url` cannot be parsed. Every
/// other failure degrades to the generic site preview.
pub async fn respond(
    state: &AppState,
    origin: &str,
    url: &str,
    user_agent: Option<&str>,
) -> Result<Preview, PreviewError> {
    let url = Url::parse(url).map_err(|e| PreviewError::MalformedUrl(format!("{url}: {e}")))?;
    let path = logical_path(&url);

    if !is_crawler(user_agent) {
        tracing::debug!(path = %path, "not a crawler, redirecting");
        return Ok(Preview::Redirect(on_origin(origin, &path)));
    }

    Ok(Preview::Html(render_for_crawler(state, origin, &path).await))
}

/// Render the preview page a crawler sees for a logical path.
pub async fn render_for_crawler(state: &AppState, origin: &str, path: &str) -> String {
    let site = &state.config.site;
    let route_path = strip_query(path);

    if let Route::Event { event_id } = resolve(route_path, site) {
        match state.events.fetch_event(event_id).await {
            Ok(event) => {
                tracing::debug!(event_id, "rendering event preview");
                return render(&event_context(&event, event_id, origin, site), site);
            }
            Err(e) => {
                tracing::warn!(event_id, error = %e, "event lookup failed, serving generic preview");
            }
        }
    }

    let page = static_page(route_path).unwrap_or_else(|| default_page(site));
    let ctx = RenderContext {
        title: page.title.to_string(),
        description: page.description.to_string(),
        image: image_url(None, origin),
        url: on_origin(origin, path),
        kind: PageKind::Website,
        published_time: None,
    };
    render(&ctx, site)
}

/// Article metadata for an event. The canonical URL uses the requested id.
fn event_context(
    event: &EventRecord,
    event_id: &str,
    origin: &str,
    site: &SiteConfig,
) -> RenderContext {
    RenderContext {
        title: event.name().unwrap_or(&site.name).to_string(),
        description: build_description(event, &site.description),
        image: image_url(event.imagem.as_deref(), origin),
        url: on_origin(origin, &format!("/eventos/{event_id}")),
        kind: PageKind::Article,
        published_time: event.created_at.clone(),
    }
}

/// The `path` query parameter, defaulting to `/` and always rooted.
fn logical_path(url: &Url) -> String {
    let path = url
        .query_pairs()
        .find(|(key, _)| key == PATH_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default();

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Drop any query string or fragment carried inside the logical path.
fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Origin of the SPA: configured value, else `X-Forwarded-Proto` + `Host`.
fn request_origin(config: &ServerConfig, headers: &HeaderMap) -> Result<String, PreviewError> {
    if let Some(origin) = &config.origin {
        return Ok(origin.clone());
    }

    let host = header_str(headers, header::HOST.as_str())
        .ok_or_else(|| PreviewError::MalformedUrl("missing Host header".into()))?;
    let scheme = header_str(headers, "x-forwarded-proto")
        .and_then(|v| v.split(',').next())
        .map_or("https", str::trim);

    parse_origin(&format!("{scheme}://{host}"))
        .ok_or_else(|| PreviewError::MalformedUrl(format!("invalid Host header: {host}")))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Preview handler: redirect humans, render for crawlers.
async fn preview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Preview, PreviewError> {
    let origin = request_origin(&state.config, &headers)?;
    let url = format!("{origin}{uri}");
    let user_agent = header_str(&headers, header::USER_AGENT.as_str());

    respond(&state, &origin, &url, user_agent).await
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}

/// Crawlers must be allowed to fetch previews.
async fn robots_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}
