//! End-to-end tests for Minimart.
//!
//! These tests drive a running server over HTTP with a cookie-holding
//! client, so they need real infrastructure:
//!
//! ```bash
//! # Terminal 1: database + server
//! cargo run -p minimart-cli -- migrate
//! cargo run -p minimart-cli -- seed
//! cargo run -p minimart-server
//!
//! # Terminal 2
//! MINIMART_BASE_URL=http://127.0.0.1:3000 cargo test -p minimart-integration-tests
//! ```
//!
//! Without `MINIMART_BASE_URL` set, every test is a silent skip.

/// Shared context for one end-to-end test.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from the environment, or `None` to skip.
    ///
    /// A fresh context has its own cookie jar, so each test gets an
    /// independent "browser".
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("MINIMART_BASE_URL").ok()?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .ok()?;
        Some(Self { client, base_url })
    }

    /// Absolute URL for a path on the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a user; ignores the outcome (used for setup).
    pub async fn register(&self, username: &str, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/register"))
            .form(&[("username", username), ("email", email), ("password", password)])
            .send()
            .await
            .expect("register request failed")
    }

    /// Log in; the session cookie lands in this context's jar.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("login request failed")
    }
}

/// A unique username for this test run, so reruns don't collide on the
/// users table.
#[must_use]
pub fn unique_user(prefix: &str) -> (String, String) {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    let username = format!("{prefix}_{tag}");
    let email = format!("{username}@test.invalid");
    (username, email)
}
