//! Restaurant entity - The owner of products.
//!
//! This service never creates or deletes restaurants. It only maintains the
//! derived `is_economic` flag, which is true when the restaurant's average
//! product price undercuts the average price of every other restaurant's products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurants")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the restaurant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Street address
    pub address: String,
    /// Postal code
    pub postal_code: String,
    /// Optional website
    pub url: Option<String>,
    /// Flat delivery fee
    pub shipping_costs: f64,
    /// Average minutes from order to delivery, when known
    pub average_service_minutes: Option<f64>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Logo image reference
    pub logo: Option<String>,
    /// Hero image reference
    pub hero_image: Option<String>,
    /// Lifecycle status (e.g., "online", "offline", "closed")
    pub status: String,
    /// ID of the restaurant category
    pub restaurant_category_id: i64,
    /// Owner user id - administrative, never part of public projections
    pub user_id: i64,
    /// Derived flag maintained by `core::economic`
    pub is_economic: bool,
    /// When the restaurant was created
    pub created_at: DateTime,
    /// When the restaurant was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Restaurant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each restaurant belongs to one restaurant category
    #[sea_orm(
        belongs_to = "super::restaurant_category::Entity",
        from = "Column::RestaurantCategoryId",
        to = "super::restaurant_category::Column::Id"
    )]
    RestaurantCategory,
    /// One restaurant has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
    /// One restaurant has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::restaurant_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantCategory.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
