//! Static page routes.
//!
//! Pages are served verbatim from the `pages/` subtree of the
//! configured assets directory. The main pages sit behind the access
//! guard; an unauthenticated request is redirected to the login page.

use axum::{
    extract::State,
    response::{Html, Redirect},
};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Read a page from the `pages/` subtree of the assets directory.
///
/// Pages are kept out of the public asset fallback so the only way to
/// a gated page is through its guarded route.
async fn serve_page(state: &AppState, file: &str) -> Result<Html<String>> {
    let path = state.config().assets_dir.join("pages").join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("no such page: {file}")))
        }
        Err(e) => Err(AppError::Internal(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

/// `GET /` - root redirects to the login page.
pub async fn index() -> Redirect {
    Redirect::to("/login.html")
}

/// `GET /login.html` - public.
pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>> {
    serve_page(&state, "login.html").await
}

/// `GET /register.html` - public.
pub async fn register_page(State(state): State<AppState>) -> Result<Html<String>> {
    serve_page(&state, "register.html").await
}

/// `GET /home.html` - session required.
pub async fn home_page(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    serve_page(&state, "home.html").await
}

/// `GET /products.html` - session required.
pub async fn products_page(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    serve_page(&state, "products.html").await
}

/// `GET /cart.html` - session required.
pub async fn cart_page(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    serve_page(&state, "cart.html").await
}
