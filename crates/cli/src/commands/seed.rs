//! Catalog seeding command.
//!
//! Inserts a small demo catalog. The server never writes to `products`,
//! so this is the only way rows get there. Idempotent: rows are keyed
//! by the unique product name and existing ones are left alone.
//!
//! # Environment Variables
//!
//! - `MINIMART_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;

use minimart_server::db;

/// Demo catalog: (name, price in cents, image).
const DEMO_PRODUCTS: &[(&str, i64, Option<&str>)] = &[
    ("Espresso Beans 1kg", 1899, Some("/images/beans.jpg")),
    ("Pour-Over Kettle", 4500, Some("/images/kettle.jpg")),
    ("Ceramic Mug", 1250, None),
    ("Hand Grinder", 3999, Some("/images/grinder.jpg")),
    ("Filter Papers (100)", 650, None),
];

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert the demo catalog.
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("MINIMART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("MINIMART_DATABASE_URL"))?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let mut inserted = 0u64;
    for &(name, cents, image) in DEMO_PRODUCTS {
        let result = sqlx::query(
            r"
            INSERT INTO products (name, price, image)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(name)
        .bind(Decimal::new(cents, 2))
        .bind(image)
        .execute(&pool)
        .await?;

        inserted += result.rows_affected();
    }

    info!(
        inserted,
        total = DEMO_PRODUCTS.len(),
        "Catalog seeding complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_prices_are_positive() {
        for &(name, cents, _) in DEMO_PRODUCTS {
            assert!(cents > 0, "{name} must have a positive price");
        }
    }

    #[test]
    fn test_demo_names_are_unique() {
        let mut names: Vec<_> = DEMO_PRODUCTS.iter().map(|p| p.0).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEMO_PRODUCTS.len());
    }
}
