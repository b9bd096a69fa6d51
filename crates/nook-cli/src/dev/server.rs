//! Development server: bootstrap wiring and HTTP routes.
//!
//! The bootstrap builds an axum app from three substitutable pieces: the
//! configuration snapshot, a [`Compiler`](crate::bundler::Compiler) and a
//! [`MiddlewareFactory`]. Development middleware is always attached; hot
//! reload middleware is constructed and attached only when the
//! configuration's hot flag is set.

use crate::bundler::{Compiler, MODULES_BUNDLE_PATH};
use crate::dev::{DevEvent, SharedState};
use crate::error::{CliError, Result};
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response, Sse},
    routing::get,
    Json, Router,
};
use nook_config::ServerConfig;
use nook_discovery::FixtureMapping;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

/// Constructs the middleware attached by the bootstrap.
///
/// Substitutable so the wiring can be verified without a real compiler or
/// filesystem behind it.
pub trait MiddlewareFactory: Send + Sync {
    /// Development middleware serving the compiler output and static files
    /// from the configured root path.
    fn dev(&self, compiler: Arc<dyn Compiler>, root_path: &Path, state: SharedState) -> Router;

    /// Hot-reload middleware bound to the same compiler.
    fn hot(&self, compiler: Arc<dyn Compiler>, state: SharedState) -> Router;
}

/// Build the dev-server app: fixed routes, dev middleware, hot middleware
/// (only when enabled) and a permissive CORS layer.
pub fn build_app(
    config: &ServerConfig,
    compiler: Arc<dyn Compiler>,
    factory: &dyn MiddlewareFactory,
    state: SharedState,
) -> Router {
    let mut app = Router::new()
        .route("/", get(handle_index))
        .route("/api/fixtures", get(handle_fixtures))
        .route("/favicon.ico", get(handle_favicon))
        .with_state(state.clone())
        .merge(factory.dev(Arc::clone(&compiler), &config.root_path, state.clone()));

    if config.hot {
        app = app.merge(factory.hot(compiler, state));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Production middleware factory.
pub struct DefaultMiddlewareFactory;

impl MiddlewareFactory for DefaultMiddlewareFactory {
    fn dev(&self, compiler: Arc<dyn Compiler>, root_path: &Path, state: SharedState) -> Router {
        let ctx = DevContext {
            state,
            compiler,
            root: root_path.to_path_buf(),
        };
        Router::new().fallback(handle_request).with_state(ctx)
    }

    fn hot(&self, _compiler: Arc<dyn Compiler>, state: SharedState) -> Router {
        Router::new()
            .route("/__nook_events__", get(handle_sse))
            .route("/__nook_reload__.js", get(handle_reload_script))
            .with_state(state)
    }
}

/// Development server.
pub struct DevServer {
    config: ServerConfig,
    app: Router,
}

impl DevServer {
    /// Wire up the app for the given configuration.
    pub fn new(
        config: ServerConfig,
        compiler: Arc<dyn Compiler>,
        factory: &dyn MiddlewareFactory,
        state: SharedState,
    ) -> Self {
        let app = build_app(&config, compiler, factory, state);
        Self { config, app }
    }

    /// Bind to the configured host/port and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound; the caller treats
    /// that as a startup failure.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.listen_addr();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        crate::ui::success(&format!(
            "Nook running at {}",
            self.config.server_url()
        ));

        axum::serve(listener, self.app)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// State for the dev middleware: cache, compiler and static root.
#[derive(Clone)]
struct DevContext {
    state: SharedState,
    compiler: Arc<dyn Compiler>,
    root: PathBuf,
}

const INDEX_HTML: &str = include_str!("../../assets/playground/index.html");
const RELOAD_SCRIPT: &str = include_str!("../../assets/dev/reload-client.js");

/// Serve the playground page, with the reload client injected when hot
/// reload is enabled.
async fn handle_index(State(state): State<SharedState>) -> impl IntoResponse {
    let html = if state.hot {
        inject_reload_script(INDEX_HTML)
    } else {
        INDEX_HTML.to_string()
    };

    html_response(html)
}

/// Fixture-listing query endpoint.
async fn handle_fixtures(State(state): State<SharedState>) -> Json<FixtureMapping> {
    Json(state.fixtures())
}

/// Handle favicon requests with 204 No Content.
async fn handle_favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Handle SSE connections for reload events.
async fn handle_sse(
    State(state): State<SharedState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<axum::response::sse::Event, std::convert::Infallible>>>
{
    use axum::response::sse::Event;

    let (id, rx) = state.register_client();
    tracing::debug!(client = id, "client connected via SSE");

    let _ = state.broadcast(&DevEvent::ClientConnected { id }).await;

    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}

/// Serve the reload client script.
async fn handle_reload_script() -> impl IntoResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/javascript")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(RELOAD_SCRIPT))
        .unwrap()
}

/// Fallback: serve the compiled bundle from cache, then static files from
/// the root path.
async fn handle_request(State(ctx): State<DevContext>, uri: Uri) -> Response {
    let path = uri.path();

    if let Some(error) = ctx.state.get_status().error() {
        return plain_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Build failed:\n{}", error),
        );
    }

    // Compile the entry bundle on demand if it hasn't been built yet.
    if path == MODULES_BUNDLE_PATH && ctx.state.get_cached_file(path).is_none() {
        match ctx.compiler.compile() {
            Ok(output) => {
                ctx.state.update_cache(output.cache);
                ctx.state.update_fixtures(output.fixtures);
            }
            Err(e) => {
                let error = e.to_string();
                ctx.state.fail_build(error.clone());
                return plain_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Build failed:\n{}", error),
                );
            }
        }
    }

    if let Some((content, content_type)) = ctx.state.get_cached_file(path) {
        return file_response(content, &content_type);
    }

    // Static files from the project root.
    if let Some(file_path) = safe_join(&ctx.root, path) {
        if file_path.is_file() {
            match tokio::fs::read(&file_path).await {
                Ok(content) => {
                    return file_response(content, content_type_for(path));
                }
                Err(e) => {
                    tracing::warn!(path = %file_path.display(), error = %e, "failed to read static file");
                }
            }
        }
    }

    plain_response(StatusCode::NOT_FOUND, format!("File not found: {}", path))
}

/// Join a request path onto the static root, rejecting traversal.
fn safe_join(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

/// Inject the reload client script before the closing body tag.
fn inject_reload_script(html: &str) -> String {
    let script_tag = r#"<script src="/__nook_reload__.js"></script>"#;

    if let Some(pos) = html.rfind("</body>") {
        let mut result = String::with_capacity(html.len() + script_tag.len() + 4);
        result.push_str(&html[..pos]);
        result.push_str("  ");
        result.push_str(script_tag);
        result.push('\n');
        result.push_str(&html[pos..]);
        return result;
    }

    let mut result = html.to_string();
    result.push('\n');
    result.push_str(script_tag);
    result
}

/// Determine content type from file extension.
fn content_type_for(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "js" | "mjs" | "jsx" => "application/javascript",
        "json" | "map" => "application/json",
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

fn html_response(html: String) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(html))
        .unwrap()
}

fn file_response(content: Vec<u8>, content_type: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(content))
        .unwrap()
}

fn plain_response(status: StatusCode, body: String) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body))
        .unwrap()
}
