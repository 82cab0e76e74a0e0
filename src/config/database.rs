//! Database configuration module for the products service.
//!
//! This module handles the `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust structs, foreign keys included.

use crate::entities::{
    Order, OrderProduct, Product, ProductCategory, Restaurant, RestaurantCategory,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Default location of the `SQLite` file when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/products.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to [`DEFAULT_DATABASE_URL`] if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    info!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet, parents before children so the
/// foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(RestaurantCategory),
        schema.create_table_from_entity(Restaurant),
        schema.create_table_from_entity(ProductCategory),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderProduct),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }
    debug!("Ensured {} tables exist", statements.len());

    Ok(())
}
