//! Session middleware configuration.
//!
//! Sets up process-local in-memory sessions using tower-sessions. The
//! session token handed to the client is an opaque, unguessable ID; the
//! identity snapshot lives server-side. Swapping `MemoryStore` for a
//! shared store (e.g. a sqlx-backed one) is the extension point for
//! running more than one serving process.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "minimart_session";

/// Session idle expiry in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// The cookie is script-inaccessible (`HttpOnly`), same-site restricted
/// (`Lax`), and marked `Secure` when the configured base URL is HTTPS.
#[must_use]
pub fn create_session_layer(config: &ServerConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
