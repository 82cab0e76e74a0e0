//! Popular products ranking.
//!
//! Sums the ordered quantity of every product over all order lines and returns the
//! best sellers with their restaurant and the restaurant's category. Products that
//! were never ordered do not appear. Equal totals are ranked by lower product id.

use crate::{
    entities::{
        OrderProduct, Product, Restaurant, RestaurantCategory, order_product, product, restaurant,
        restaurant_category,
    },
    errors::Result,
};
use sea_orm::{FromQueryResult, JoinType, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Number of products returned by [`popular_products`].
pub const POPULAR_LIMIT: u64 = 3;

#[derive(Debug, FromQueryResult)]
struct SoldCount {
    product_id: i64,
    sold_product_count: i64,
}

/// Restaurant fields shown next to a popular product. The owner id, the
/// economic flag and the timestamps are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub url: Option<String>,
    pub shipping_costs: f64,
    pub average_service_minutes: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub status: String,
    pub restaurant_category_id: i64,
    pub restaurant_category: Option<restaurant_category::Model>,
}

impl From<(restaurant::Model, Option<restaurant_category::Model>)> for RestaurantSummary {
    fn from(
        (restaurant, restaurant_category): (
            restaurant::Model,
            Option<restaurant_category::Model>,
        ),
    ) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            description: restaurant.description,
            address: restaurant.address,
            postal_code: restaurant.postal_code,
            url: restaurant.url,
            shipping_costs: restaurant.shipping_costs,
            average_service_minutes: restaurant.average_service_minutes,
            email: restaurant.email,
            phone: restaurant.phone,
            logo: restaurant.logo,
            hero_image: restaurant.hero_image,
            status: restaurant.status,
            restaurant_category_id: restaurant.restaurant_category_id,
            restaurant_category,
        }
    }
}

/// One entry of the popularity ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularProduct {
    #[serde(flatten)]
    pub product: product::Model,
    /// Total units sold across all orders
    pub sold_product_count: i64,
    pub restaurant: RestaurantSummary,
}

/// Returns up to [`POPULAR_LIMIT`] best-selling products, highest total first.
///
/// The aggregate and the product and restaurant loads run in one transaction,
/// so a product deleted between them cannot drop out of the ranking.
///
/// # Errors
/// Returns an error if any of the database queries fail.
#[instrument(skip(db))]
pub async fn popular_products(db: &DatabaseConnection) -> Result<Vec<PopularProduct>> {
    let txn = db.begin().await?;
    let popular = rank_popular(&txn).await?;
    txn.commit().await?;
    Ok(popular)
}

async fn rank_popular<C: ConnectionTrait>(db: &C) -> Result<Vec<PopularProduct>> {
    let ranking: Vec<SoldCount> = OrderProduct::find()
        .select_only()
        .column(order_product::Column::ProductId)
        .column_as(order_product::Column::Quantity.sum(), "sold_product_count")
        .join(JoinType::InnerJoin, order_product::Relation::Product.def())
        .group_by(order_product::Column::ProductId)
        .order_by_desc(order_product::Column::Quantity.sum())
        .order_by_asc(order_product::Column::ProductId)
        .limit(POPULAR_LIMIT)
        .into_model::<SoldCount>()
        .all(db)
        .await?;

    if ranking.is_empty() {
        debug!("No order lines yet, popularity ranking is empty");
        return Ok(Vec::new());
    }

    let product_ids: Vec<i64> = ranking.iter().map(|row| row.product_id).collect();
    let mut products: HashMap<i64, product::Model> = Product::find()
        .filter(product::Column::Id.is_in(product_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let restaurant_ids: Vec<i64> = products.values().map(|p| p.restaurant_id).collect();
    let restaurants: HashMap<i64, RestaurantSummary> = Restaurant::find()
        .filter(restaurant::Column::Id.is_in(restaurant_ids))
        .find_also_related(RestaurantCategory)
        .all(db)
        .await?
        .into_iter()
        .map(|pair| (pair.0.id, RestaurantSummary::from(pair)))
        .collect();

    let popular: Vec<PopularProduct> = ranking
        .into_iter()
        .filter_map(|row| {
            let product = products.remove(&row.product_id)?;
            let restaurant = restaurants.get(&product.restaurant_id)?.clone();
            Some(PopularProduct {
                product,
                sold_product_count: row.sold_product_count,
                restaurant,
            })
        })
        .collect();

    debug!("Ranked {} popular products", popular.len());
    Ok(popular)
}
