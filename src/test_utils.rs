//! Shared test utilities for the products service.
//!
//! This module provides helper functions for setting up in-memory test databases
//! and inserting rows with sensible defaults. Rows inserted here bypass the
//! product service, so no economic flag is recalculated as a side effect.

use crate::{
    core::product::NewProduct,
    entities::{order, order_product, product, product_category, restaurant, restaurant_category},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a test database with one product category.
/// Returns (db, category) for product tests.
pub async fn setup_with_category() -> Result<(DatabaseConnection, product_category::Model)> {
    let db = setup_test_db().await?;
    let category = product_category::ActiveModel {
        name: Set("Main courses".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    Ok((db, category))
}

/// Creates a restaurant (and a restaurant category for it) with sensible defaults.
///
/// # Defaults
/// * `address`: "Test street 1"
/// * `status`: "online"
/// * `shipping_costs`: 2.5
/// * `is_economic`: false
pub async fn create_test_restaurant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<restaurant::Model> {
    let restaurant_category = restaurant_category::ActiveModel {
        name: Set(format!("{name} cuisine")),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let now = chrono::Utc::now().naive_utc();
    restaurant::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        address: Set("Test street 1".to_string()),
        postal_code: Set("41001".to_string()),
        url: Set(None),
        shipping_costs: Set(2.5),
        average_service_minutes: Set(None),
        email: Set(None),
        phone: Set(None),
        logo: Set(None),
        hero_image: Set(None),
        status: Set("online".to_string()),
        restaurant_category_id: Set(restaurant_category.id),
        user_id: Set(1),
        is_economic: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Builds a create payload with sensible defaults.
///
/// # Defaults
/// * `name`: "Test Product"
/// * `order` and `availability`: true
#[must_use]
pub fn new_product(restaurant_id: i64, product_category_id: i64, price: f64) -> NewProduct {
    NewProduct {
        name: "Test Product".to_string(),
        description: None,
        price,
        image: None,
        order: true,
        availability: true,
        restaurant_id,
        product_category_id,
    }
}

/// Inserts a product row directly, without recalculating any flag.
pub async fn insert_product(
    db: &DatabaseConnection,
    restaurant_id: i64,
    product_category_id: i64,
    price: f64,
) -> Result<product::Model> {
    let now = chrono::Utc::now().naive_utc();
    product::ActiveModel {
        name: Set(format!("Product at {price}")),
        description: Set(None),
        price: Set(price),
        image: Set(None),
        order: Set(true),
        availability: Set(true),
        restaurant_id: Set(restaurant_id),
        product_category_id: Set(product_category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates an order at `restaurant_id` with a single line for `product_id`.
pub async fn create_test_order_line(
    db: &DatabaseConnection,
    restaurant_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<order_product::Model> {
    let order = order::ActiveModel {
        created_at: Set(chrono::Utc::now().naive_utc()),
        started_at: Set(None),
        sent_at: Set(None),
        delivered_at: Set(None),
        price: Set(10.0),
        address: Set("Customer street 2".to_string()),
        shipping_costs: Set(2.5),
        restaurant_id: Set(restaurant_id),
        user_id: Set(2),
        ..Default::default()
    }
    .insert(db)
    .await?;

    order_product::ActiveModel {
        quantity: Set(quantity),
        unity_price: Set(5.0),
        order_id: Set(order.id),
        product_id: Set(product_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
