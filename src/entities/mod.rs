//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Only `product` is owned by this service; restaurants are touched solely to
//! maintain their `is_economic` flag, and the remaining tables are read-only.

pub mod order;
pub mod order_product;
pub mod product;
pub mod product_category;
pub mod restaurant;
pub mod restaurant_category;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_product::{
    Column as OrderProductColumn, Entity as OrderProduct, Model as OrderProductModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_category::{
    Column as ProductCategoryColumn, Entity as ProductCategory, Model as ProductCategoryModel,
};
pub use restaurant::{Column as RestaurantColumn, Entity as Restaurant, Model as RestaurantModel};
pub use restaurant_category::{
    Column as RestaurantCategoryColumn, Entity as RestaurantCategory,
    Model as RestaurantCategoryModel,
};
