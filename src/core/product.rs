//! Product business logic - Handles all product-related operations.
//!
//! This module provides the product operations exposed over HTTP: listing a
//! restaurant's products, fetching one product's public view, and creating,
//! updating, and deleting products. Every mutation recalculates the owning
//! restaurant's `is_economic` flag in the same database transaction, so the flag
//! can never be left stale by a failure between the two writes.

use crate::{
    core::economic::recalculate_is_economic,
    entities::{Product, ProductCategory, product, product_category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Payload for creating a product
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Name shown on the menu
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price, must be positive and finite
    pub price: f64,
    /// Optional image reference
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the product can be ordered, defaults to true
    #[serde(default = "default_true")]
    pub order: bool,
    /// Whether the product is in stock, defaults to true
    #[serde(default = "default_true")]
    pub availability: bool,
    /// Owning restaurant
    pub restaurant_id: i64,
    /// Product category
    pub product_category_id: i64,
}

const fn default_true() -> bool {
    true
}

/// Partial update payload. Absent (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub order: Option<bool>,
    pub availability: Option<bool>,
    /// Moves the product to another restaurant when it differs from the stored one
    pub restaurant_id: Option<i64>,
    pub product_category_id: Option<i64>,
}

/// A product together with its category, as returned by restaurant listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: product::Model,
    pub product_category: Option<product_category::Model>,
}

/// The public view of a product.
///
/// This is an explicit whitelist: any column added to `products` stays private
/// until it is added here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProduct {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub order: bool,
    pub availability: bool,
    pub restaurant_id: i64,
    pub product_category_id: i64,
    pub product_category: Option<product_category::Model>,
}

impl From<(product::Model, Option<product_category::Model>)> for PublicProduct {
    fn from(
        (product, product_category): (product::Model, Option<product_category::Model>),
    ) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            order: product.order,
            availability: product.availability,
            restaurant_id: product.restaurant_id,
            product_category_id: product.product_category_id,
            product_category,
        }
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidName);
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(price)
}

/// Lists every product of a restaurant with its category, ordered by id.
///
/// An unknown restaurant or one without products yields an empty list.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn list_by_restaurant(
    db: &DatabaseConnection,
    restaurant_id: i64,
) -> Result<Vec<ProductWithCategory>> {
    let rows = Product::find()
        .filter(product::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(product::Column::Id)
        .find_also_related(ProductCategory)
        .all(db)
        .await?;

    debug!("Found {} products for restaurant {}", rows.len(), restaurant_id);
    Ok(rows
        .into_iter()
        .map(|(product, product_category)| ProductWithCategory {
            product,
            product_category,
        })
        .collect())
}

/// Fetches the public view of one product, `None` if it does not exist.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn get_public(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<PublicProduct>> {
    Ok(Product::find_by_id(product_id)
        .find_also_related(ProductCategory)
        .one(db)
        .await?
        .map(PublicProduct::from))
}

/// Creates a product and refreshes its restaurant's economic flag.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The price is zero, negative, or not finite
/// - The restaurant or category does not exist (foreign key violation)
/// - Any database operation fails; nothing is persisted in that case
#[instrument(skip(db))]
pub async fn create(db: &DatabaseConnection, new_product: NewProduct) -> Result<product::Model> {
    let name = validate_name(&new_product.name)?;
    let price = validate_price(new_product.price)?;
    let now = chrono::Utc::now().naive_utc();

    let txn = db.begin().await?;

    let created = product::ActiveModel {
        name: Set(name),
        description: Set(new_product.description),
        price: Set(price),
        image: Set(new_product.image),
        order: Set(new_product.order),
        availability: Set(new_product.availability),
        restaurant_id: Set(new_product.restaurant_id),
        product_category_id: Set(new_product.product_category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    recalculate_is_economic(&txn, created.restaurant_id).await?;

    txn.commit().await?;

    info!(
        "Created product {} '{}' for restaurant {}",
        created.id, created.name, created.restaurant_id
    );
    Ok(created)
}

/// Applies a partial update to a product and returns the updated row.
///
/// The economic flag is recalculated for the restaurant the product belonged to
/// before the update and, if the update moved it, for the new restaurant too.
/// When the product does not exist nothing is written, `None` is returned, and
/// the payload's `restaurant_id` (if any) is still recalculated.
///
/// # Errors
/// Returns an error if:
/// - A supplied name is empty or a supplied price is invalid
/// - A supplied restaurant or category does not exist
/// - Any database operation fails; nothing is persisted in that case
#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    product_id: i64,
    changes: ProductChanges,
) -> Result<Option<product::Model>> {
    let name = changes.name.as_deref().map(validate_name).transpose()?;
    let price = changes.price.map(validate_price).transpose()?;

    let txn = db.begin().await?;

    let Some(existing) = Product::find_by_id(product_id).one(&txn).await? else {
        warn!("Product {} not found for update", product_id);
        if let Some(restaurant_id) = changes.restaurant_id {
            recalculate_is_economic(&txn, restaurant_id).await?;
        }
        txn.commit().await?;
        return Ok(None);
    };

    let previous_restaurant_id = existing.restaurant_id;
    let mut product: product::ActiveModel = existing.into();

    if let Some(name) = name {
        product.name = Set(name);
    }
    if let Some(price) = price {
        product.price = Set(price);
    }
    if let Some(description) = changes.description {
        product.description = Set(Some(description));
    }
    if let Some(image) = changes.image {
        product.image = Set(Some(image));
    }
    if let Some(order) = changes.order {
        product.order = Set(order);
    }
    if let Some(availability) = changes.availability {
        product.availability = Set(availability);
    }
    if let Some(restaurant_id) = changes.restaurant_id {
        product.restaurant_id = Set(restaurant_id);
    }
    if let Some(product_category_id) = changes.product_category_id {
        product.product_category_id = Set(product_category_id);
    }
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(&txn).await?;
    let updated = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("product {product_id}")))?;

    recalculate_is_economic(&txn, previous_restaurant_id).await?;
    if updated.restaurant_id != previous_restaurant_id {
        recalculate_is_economic(&txn, updated.restaurant_id).await?;
    }

    txn.commit().await?;

    info!("Updated product {}", product_id);
    Ok(Some(updated))
}

/// Deletes a product and returns a message describing the outcome.
///
/// The economic flag is recalculated for the deleted product's restaurant. The
/// caller-supplied `restaurant_hint` is only used when no product matched.
///
/// # Errors
/// Returns an error if the product is still referenced by order lines
/// (foreign key violation) or if any database operation fails.
#[instrument(skip(db))]
pub async fn destroy(
    db: &DatabaseConnection,
    product_id: i64,
    restaurant_hint: Option<i64>,
) -> Result<String> {
    let txn = db.begin().await?;

    let existing = Product::find_by_id(product_id).one(&txn).await?;
    let deleted = Product::delete_by_id(product_id)
        .exec(&txn)
        .await?
        .rows_affected;

    let target = match (&existing, restaurant_hint) {
        (Some(product), Some(hint)) if hint != product.restaurant_id => {
            warn!(
                "Restaurant hint {} does not match product {} owner {}, using owner",
                hint, product_id, product.restaurant_id
            );
            Some(product.restaurant_id)
        }
        (Some(product), _) => Some(product.restaurant_id),
        (None, hint) => hint,
    };
    if let Some(restaurant_id) = target {
        recalculate_is_economic(&txn, restaurant_id).await?;
    }

    txn.commit().await?;

    if deleted == 1 {
        info!("Deleted product {}", product_id);
        Ok(format!("Sucessfuly deleted product id.{product_id}"))
    } else {
        warn!("Product {} not deleted ({} rows affected)", product_id, deleted);
        Ok("Could not delete product.".to_string())
    }
}
