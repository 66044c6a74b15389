//! HTTP route handlers for the shop.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Redirect to login page
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (DB ping)
//!
//! # Pages (served from the assets pages/ directory)
//! GET  /login.html       - Login page (public)
//! GET  /register.html    - Registration page (public)
//! GET  /home.html        - Home page (session required)
//! GET  /products.html    - Catalog page (session required)
//! GET  /cart.html        - Cart page (session required)
//!
//! # Auth
//! POST /register         - Create account, redirect to login
//! POST /login            - Authenticate, set session cookie, redirect home
//! GET  /logout           - Destroy session, redirect to login
//!
//! # JSON API
//! GET  /api/products     - Full catalog (public)
//! POST /api/cart         - Add to cart, upsert quantity (session required)
//! GET  /api/cart         - Cart lines joined with products (session required)
//! POST /api/checkout     - Clear the cart (session required)
//! GET  /api/me           - Current identity snapshot (session required)
//! ```

pub mod api;
pub mod auth;
pub mod pages;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create all routes for the server.
///
/// The API routes are registered with their full `/api/...` paths so
/// the access guard sees the prefix when it decides between a 401 and
/// a login redirect.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Root redirects to login
        .route("/", get(pages::index))
        // Public pages
        .route("/login.html", get(pages::login_page))
        .route("/register.html", get(pages::register_page))
        // Session-gated pages
        .route("/home.html", get(pages::home_page))
        .route("/products.html", get(pages::products_page))
        .route("/cart.html", get(pages::cart_page))
        // Auth actions
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        // JSON API
        .route("/api/products", get(api::products))
        .route("/api/cart", get(api::cart).post(api::add_to_cart))
        .route("/api/checkout", post(api::checkout))
        .route("/api/me", get(api::me))
}

/// Assemble the application router: routes, health checks, the static
/// asset fallback, and the session and trace layers.
///
/// The fallback serves only the `public/` subtree of the assets
/// directory. The gated HTML pages live under `pages/` and are never
/// reachable through the fallback, which percent-decodes paths the
/// router matches literally.
pub fn app(state: AppState) -> Router {
    let session_layer = crate::middleware::create_session_layer(state.config());
    let public_dir = state.config().assets_dir.join("public");

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        // Anything else (scripts, styles) comes verbatim from public/
        .fallback_service(ServeDir::new(public_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::state::AppState;

    use super::app;

    /// State over a lazy pool; no request here ever reaches the
    /// database, the access guard rejects first.
    fn test_state() -> AppState {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://minimart@localhost/minimart"),
            host: "127.0.0.1".parse().expect("valid host"),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            assets_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            sentry_dsn: None,
        };
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://minimart@localhost/minimart")
            .expect("lazy pool");
        AppState::new(config, pool)
    }

    async fn send(method: &str, uri: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        app(test_state()).oneshot(request).await.expect("infallible")
    }

    #[tokio::test]
    async fn gated_apis_reject_with_401_not_redirect() {
        for (method, uri) in [
            ("GET", "/api/cart"),
            ("POST", "/api/checkout"),
            ("GET", "/api/me"),
        ] {
            let resp = send(method, uri).await;
            assert_eq!(
                resp.status(),
                StatusCode::UNAUTHORIZED,
                "{method} {uri} without a session"
            );

            let body = axum::body::to_bytes(resp.into_body(), 1024)
                .await
                .expect("body");
            let json: serde_json::Value = serde_json::from_slice(&body).expect("JSON body");
            assert_eq!(json["error"], "Not authenticated");
        }
    }

    #[tokio::test]
    async fn gated_pages_redirect_to_login() {
        for uri in ["/home.html", "/products.html", "/cart.html"] {
            let resp = send("GET", uri).await;
            assert!(
                resp.status().is_redirection(),
                "{uri} without a session, got {}",
                resp.status()
            );
            assert_eq!(resp.headers()["location"], "/login.html");
        }
    }

    #[tokio::test]
    async fn percent_encoded_page_paths_do_not_reach_the_assets_fallback() {
        // "/%68ome.html" decodes to "/home.html" but misses the route;
        // the fallback must not hold the gated pages.
        for uri in ["/%68ome.html", "/%63art.html", "/pages/home.html"] {
            let resp = send("GET", uri).await;
            assert_eq!(
                resp.status(),
                StatusCode::NOT_FOUND,
                "{uri} must not serve a gated page"
            );
        }
    }

    #[tokio::test]
    async fn public_assets_are_served_by_the_fallback() {
        let resp = send("GET", "/style.css").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_endpoint_is_public() {
        let resp = send("GET", "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
