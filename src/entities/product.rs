//! Product entity - Represents a sellable item on a restaurant's menu.
//!
//! Every product belongs to exactly one restaurant and one product category.
//! Orders reference products through the `order_products` join table, which
//! carries the ordered quantity used by the popularity ranking.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown on the menu (e.g., "Margherita")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Unit price, always positive
    pub price: f64,
    /// Optional image reference (path or URL)
    pub image: Option<String>,
    /// Whether customers may currently order this product
    pub order: bool,
    /// Whether the product is in stock
    pub availability: bool,
    /// ID of the owning restaurant
    pub restaurant_id: i64,
    /// ID of the product category
    pub product_category_id: i64,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one restaurant
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    /// Each product belongs to one product category
    #[sea_orm(
        belongs_to = "super::product_category::Entity",
        from = "Column::ProductCategoryId",
        to = "super::product_category::Column::Id"
    )]
    ProductCategory,
    /// One product appears in many order lines
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategory.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_product::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_product::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
