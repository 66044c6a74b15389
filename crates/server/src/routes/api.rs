//! JSON API route handlers.
//!
//! Every handler is a straight line: validate input shape, one
//! repository call, map the result to a response.

use axum::{Json, extract::State};
use serde::Serialize;

use minimart_core::{ProductId, UserId};

use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{CartLine, Product};
use crate::state::AppState;

/// Response body for `GET /api/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub username: String,
}

/// Validate an add-to-cart body.
///
/// The body is taken as a raw JSON value so shape problems surface as
/// this API's own 400 rather than an extractor rejection. Both fields
/// are required; `quantity` must be a positive integer (a float or a
/// string is rejected, not coerced). The product ID is deliberately
/// not checked against the catalog.
fn validate_add(body: &serde_json::Value) -> Result<(ProductId, i32)> {
    let product_id = body
        .get("productId")
        .and_then(serde_json::Value::as_i64)
        .and_then(|id| i32::try_from(id).ok());
    let quantity = body.get("quantity").filter(|q| !q.is_null());

    let (Some(product_id), Some(quantity)) = (product_id, quantity) else {
        return Err(AppError::Validation(
            "Product and quantity are required.".to_string(),
        ));
    };

    let quantity = quantity
        .as_i64()
        .and_then(|q| i32::try_from(q).ok())
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            AppError::Validation("Quantity must be a positive integer.".to_string())
        })?;

    Ok((ProductId::new(product_id), quantity))
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/products` - the full catalog, unauthenticated.
///
/// # Errors
///
/// 500 on a store failure.
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// `POST /api/cart` - add a quantity of a product to the caller's cart.
///
/// Repeat adds of the same product accumulate into one line via an
/// atomic upsert.
///
/// # Errors
///
/// 400 on missing fields or a quantity that is not a positive
/// integer, 401 without a session, 500 on a store failure.
pub async fn add_to_cart(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<&'static str> {
    let (product_id, quantity) = validate_add(&body)?;

    CartRepository::new(state.pool())
        .add_line(user.id, product_id, quantity)
        .await?;

    Ok("Added to cart")
}

/// `GET /api/cart` - the caller's cart lines joined with product data.
///
/// An empty cart returns an empty array.
///
/// # Errors
///
/// 401 without a session, 500 on a store failure.
pub async fn cart(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartLine>>> {
    let lines = CartRepository::new(state.pool())
        .lines_for_user(user.id)
        .await?;
    Ok(Json(lines))
}

/// `POST /api/checkout` - atomically clear the caller's cart.
///
/// No order record, payment, or inventory step; checkout is purely
/// cart-clearing.
///
/// # Errors
///
/// 401 without a session, 500 on a store failure.
pub async fn checkout(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<&'static str> {
    CartRepository::new(state.pool())
        .clear_for_user(user.id)
        .await?;

    tracing::info!(user_id = %user.id, "cart checked out");
    Ok("Order placed!")
}

/// `GET /api/me` - the caller's identity snapshot.
pub async fn me(RequireUser(user): RequireUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        username: user.username,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(result: Result<(ProductId, i32)>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_add_ok() {
        let body = json!({ "productId": 7, "quantity": 2 });
        let (product_id, quantity) = validate_add(&body).expect("valid request");
        assert_eq!(product_id, ProductId::new(7));
        assert_eq!(quantity, 2);
    }

    #[test]
    fn test_validate_add_missing_fields() {
        for body in [
            json!({ "quantity": 2 }),
            json!({ "productId": 7 }),
            json!({}),
            json!({ "productId": null, "quantity": 2 }),
            json!({ "productId": 7, "quantity": null }),
        ] {
            assert_eq!(
                message(validate_add(&body)),
                "Product and quantity are required.",
                "body {body}"
            );
        }
    }

    #[test]
    fn test_validate_add_rejects_non_positive_quantity() {
        for quantity in [0, -1, -100] {
            let body = json!({ "productId": 7, "quantity": quantity });
            assert_eq!(
                message(validate_add(&body)),
                "Quantity must be a positive integer.",
                "quantity {quantity}"
            );
        }
    }

    #[test]
    fn test_validate_add_rejects_non_integer_quantity() {
        for body in [
            json!({ "productId": 7, "quantity": 2.5 }),
            json!({ "productId": 7, "quantity": "2" }),
            json!({ "productId": 7, "quantity": true }),
            json!({ "productId": 7, "quantity": [2] }),
        ] {
            assert_eq!(
                message(validate_add(&body)),
                "Quantity must be a positive integer.",
                "body {body}"
            );
        }
    }

    #[test]
    fn test_validate_add_rejects_non_integer_product_id() {
        for body in [
            json!({ "productId": "7", "quantity": 2 }),
            json!({ "productId": 7.5, "quantity": 2 }),
            json!({ "productId": i64::MAX, "quantity": 2 }),
        ] {
            assert_eq!(
                message(validate_add(&body)),
                "Product and quantity are required.",
                "body {body}"
            );
        }
    }
}
