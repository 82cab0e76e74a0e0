//! Order line entity - Joins orders and products, carrying the ordered quantity.
//!
//! The summed `quantity` per product is what the popularity ranking sorts by.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Units of the product in this order
    pub quantity: i64,
    /// Unit price at the time the order was placed
    pub unity_price: f64,
    /// ID of the order
    pub order_id: i64,
    /// ID of the product
    pub product_id: i64,
}

/// Defines relationships between an order line and its order/product
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
