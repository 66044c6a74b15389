//! Product domain type.

use rust_decimal::Decimal;
use serde::Serialize;

use minimart_core::ProductId;

/// A catalog product.
///
/// Read-only from the server's perspective; the catalog is populated
/// out of band (`minimart-cli seed`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Non-negative unit price.
    pub price: Decimal,
    /// Optional image reference.
    pub image: Option<String>,
}
