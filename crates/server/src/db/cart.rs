//! Cart repository.
//!
//! The store is the sole arbiter of cart consistency: the add is a
//! single conditional upsert and checkout is a single bulk delete, so
//! concurrent requests from the same user (two browser tabs) cannot
//! lose updates or split a line in two.

use sqlx::PgPool;

use minimart_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add `quantity` of a product to a user's cart.
    ///
    /// Upsert semantics: creates the line on first add, increments the
    /// existing quantity on repeat adds. One atomic statement, never a
    /// read-then-write.
    ///
    /// The product ID is not validated against the catalog; a dangling
    /// reference is accepted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn add_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_lines (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_lines.quantity + EXCLUDED.quantity
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List a user's cart lines joined with product name and price.
    ///
    /// An empty cart yields an empty vec, not an error. Lines whose
    /// product ID dangles (no matching catalog row) are dropped by the
    /// inner join, mirroring the permissive add.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT p.id, p.name, p.price, c.quantity
            FROM cart_lines c
            JOIN products p ON c.product_id = p.id
            WHERE c.user_id = $1
            ORDER BY p.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Delete all of a user's cart lines (checkout).
    ///
    /// One bulk delete; idempotent when the cart is already empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn clear_for_user(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_lines WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
