//! Cart domain types.

use rust_decimal::Decimal;
use serde::Serialize;

use minimart_core::ProductId;

/// One cart line joined with its product, as returned by `GET /api/cart`.
///
/// `id` is the product ID; there is at most one line per (user, product).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    /// Product ID of this line.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Product unit price.
    pub price: Decimal,
    /// Accumulated quantity (always positive).
    pub quantity: i32,
}
