//! Access-guard behavior: gated APIs 401, gated pages redirect, and a
//! destroyed session looks exactly like no session.

use minimart_integration_tests::{TestContext, unique_user};

/// Every session-gated API yields 401 without a session.
#[tokio::test]
async fn gated_apis_unauthorized_without_session() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("MINIMART_BASE_URL not set; skipping");
        return;
    };

    for (method, path) in [
        (reqwest::Method::GET, "/api/cart"),
        (reqwest::Method::POST, "/api/checkout"),
        (reqwest::Method::GET, "/api/me"),
    ] {
        let resp = ctx
            .client
            .request(method.clone(), ctx.url(path))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), 401, "{method} {path} must be 401");
    }

    // POST /api/cart checks the session before reading the body
    let resp = ctx
        .client
        .post(ctx.url("/api/cart"))
        .json(&serde_json::json!({ "productId": 1, "quantity": 1 }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 401);
}

/// Every session-gated page redirects to login without a session; the
/// catalog API stays public.
#[tokio::test]
async fn gated_pages_redirect_without_session() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("MINIMART_BASE_URL not set; skipping");
        return;
    };

    for path in ["/home.html", "/products.html", "/cart.html"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("request failed");
        assert!(resp.status().is_redirection(), "{path} must redirect");
        assert_eq!(resp.headers()["location"], "/login.html");
    }

    let resp = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 200);
}

/// After logout, gated requests behave identically to never having
/// logged in.
#[tokio::test]
async fn logout_destroys_the_session() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("MINIMART_BASE_URL not set; skipping");
        return;
    };

    let (username, email) = unique_user("frank");
    ctx.register(&username, &email, "pw1").await;
    ctx.login(&username, "pw1").await;

    // Sanity: session works
    let resp = ctx
        .client
        .get(ctx.url("/api/me"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 200);

    let resp = ctx
        .client
        .get(ctx.url("/logout"))
        .send()
        .await
        .expect("request failed");
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()["location"], "/login.html");

    let resp = ctx
        .client
        .get(ctx.url("/api/me"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 401);

    let resp = ctx
        .client
        .get(ctx.url("/home.html"))
        .send()
        .await
        .expect("request failed");
    assert!(resp.status().is_redirection());

    // Logout again: idempotent
    let resp = ctx
        .client
        .get(ctx.url("/logout"))
        .send()
        .await
        .expect("request failed");
    assert!(resp.status().is_redirection());
}

/// A percent-encoded spelling of a gated page path must not be served
/// by the static fallback.
#[tokio::test]
async fn encoded_page_paths_are_not_served() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("MINIMART_BASE_URL not set; skipping");
        return;
    };

    for path in ["/%68ome.html", "/%63art.html", "/pages/home.html"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), 404, "{path} must not serve a gated page");
    }
}
