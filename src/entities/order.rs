//! Order entity - A customer order placed at one restaurant.
//!
//! Read-only from this service's point of view; orders are only reached through
//! `order_products` when ranking popular products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_at: DateTime,
    pub started_at: Option<DateTime>,
    pub sent_at: Option<DateTime>,
    pub delivered_at: Option<DateTime>,
    /// Total charged, shipping included
    pub price: f64,
    pub address: String,
    pub shipping_costs: f64,
    pub restaurant_id: i64,
    /// Customer who placed the order
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_product::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_product::Relation::Order.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
