//! Economic flag recalculation.
//!
//! A restaurant is "economic" when the average price of its products is strictly
//! lower than the average price of all products belonging to other restaurants.
//! The flag is recomputed after every product mutation, inside the same database
//! transaction as the mutation itself, so it always reflects the latest prices.

use crate::{
    entities::{Product, Restaurant, product, restaurant},
    errors::{Error, Result},
};
use sea_orm::{
    QuerySelect, Set,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};
use tracing::{debug, info, instrument};

/// Average product price over the rows matching `condition`, `None` when no row matches.
async fn average_price<C>(db: &C, condition: SimpleExpr) -> Result<Option<f64>>
where
    C: ConnectionTrait,
{
    let average: Option<Option<f64>> = Product::find()
        .select_only()
        .column_as(
            SimpleExpr::from(Func::avg(Expr::col(product::Column::Price))),
            "avg_price",
        )
        .filter(condition)
        .into_tuple()
        .one(db)
        .await?;

    Ok(average.flatten())
}

/// Recomputes and persists `is_economic` for one restaurant.
///
/// Returns the decided flag, or `None` when either average is undefined (the
/// restaurant has no products, or no other restaurant does). In that case the
/// stored flag is left exactly as it was.
///
/// Generic over the connection so callers can run it inside their transaction.
///
/// # Errors
/// Returns an error if an aggregate query fails, or if both averages are defined
/// but the restaurant row does not exist.
#[instrument(skip(db))]
pub async fn recalculate_is_economic<C>(db: &C, restaurant_id: i64) -> Result<Option<bool>>
where
    C: ConnectionTrait,
{
    let own = average_price(db, product::Column::RestaurantId.eq(restaurant_id)).await?;
    let others = average_price(db, product::Column::RestaurantId.ne(restaurant_id)).await?;

    let (Some(own), Some(others)) = (own, others) else {
        debug!(
            "Average undefined for restaurant {} (own: {:?}, others: {:?}), flag unchanged",
            restaurant_id, own, others
        );
        return Ok(None);
    };

    let is_economic = own < others;

    let restaurant = Restaurant::find_by_id(restaurant_id)
        .one(db)
        .await?
        .ok_or(Error::RestaurantNotFound { id: restaurant_id })?;

    if restaurant.is_economic != is_economic {
        let mut restaurant: restaurant::ActiveModel = restaurant.into();
        restaurant.is_economic = Set(is_economic);
        restaurant.updated_at = Set(chrono::Utc::now().naive_utc());
        restaurant.update(db).await?;
        info!(
            "Restaurant {} is_economic set to {} (avg {:.2} vs others {:.2})",
            restaurant_id, is_economic, own, others
        );
    }

    Ok(Some(is_economic))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    async fn is_economic(db: &DatabaseConnection, restaurant_id: i64) -> Result<bool> {
        Ok(Restaurant::find_by_id(restaurant_id)
            .one(db)
            .await?
            .unwrap()
            .is_economic)
    }

    #[tokio::test]
    async fn test_cheaper_restaurant_becomes_economic() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_test_restaurant(&db, "A").await?;
        let b = create_test_restaurant(&db, "B").await?;
        insert_product(&db, a.id, category.id, 10.0).await?;
        insert_product(&db, a.id, category.id, 20.0).await?;
        insert_product(&db, b.id, category.id, 30.0).await?;

        assert_eq!(recalculate_is_economic(&db, a.id).await?, Some(true));
        assert!(is_economic(&db, a.id).await?);

        assert_eq!(recalculate_is_economic(&db, b.id).await?, Some(false));
        assert!(!is_economic(&db, b.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_equal_averages_are_not_economic() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_test_restaurant(&db, "A").await?;
        let b = create_test_restaurant(&db, "B").await?;
        insert_product(&db, a.id, category.id, 15.0).await?;
        insert_product(&db, b.id, category.id, 10.0).await?;
        insert_product(&db, b.id, category.id, 20.0).await?;

        assert_eq!(recalculate_is_economic(&db, a.id).await?, Some(false));
        assert!(!is_economic(&db, a.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_flag_cleared_when_no_longer_cheaper() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_test_restaurant(&db, "A").await?;
        let b = create_test_restaurant(&db, "B").await?;
        insert_product(&db, a.id, category.id, 5.0).await?;
        insert_product(&db, b.id, category.id, 30.0).await?;
        recalculate_is_economic(&db, a.id).await?;
        assert!(is_economic(&db, a.id).await?);

        insert_product(&db, a.id, category.id, 100.0).await?;
        assert_eq!(recalculate_is_economic(&db, a.id).await?, Some(false));
        assert!(!is_economic(&db, a.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_restaurant_without_products_is_untouched() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_test_restaurant(&db, "A").await?;
        let b = create_test_restaurant(&db, "B").await?;
        insert_product(&db, b.id, category.id, 30.0).await?;

        let mut active: restaurant::ActiveModel = a.clone().into();
        active.is_economic = Set(true);
        active.update(&db).await?;

        assert_eq!(recalculate_is_economic(&db, a.id).await?, None);
        assert!(is_economic(&db, a.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_only_restaurant_with_products_is_untouched() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_test_restaurant(&db, "A").await?;
        insert_product(&db, a.id, category.id, 30.0).await?;

        assert_eq!(recalculate_is_economic(&db, a.id).await?, None);
        assert!(!is_economic(&db, a.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_restaurant_without_rows_is_noop() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_test_restaurant(&db, "A").await?;
        insert_product(&db, a.id, category.id, 30.0).await?;

        assert_eq!(recalculate_is_economic(&db, 999).await?, None);

        Ok(())
    }
}
