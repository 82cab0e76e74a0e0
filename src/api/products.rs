//! Product route handlers.

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath},
    },
    core::{
        popularity::{self, PopularProduct},
        product::{self, NewProduct, ProductChanges, ProductWithCategory, PublicProduct},
    },
    entities::ProductModel,
    errors::Result,
};
use axum::{Json, extract::State};
use serde::Deserialize;

/// Optional body of `DELETE /products/:product_id`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestroyRequest {
    /// Restaurant to refresh when the product no longer exists
    pub restaurant_id: Option<i64>,
}

/// `GET /restaurants/:restaurant_id/products`
pub async fn index_restaurant(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
) -> Result<Json<Vec<ProductWithCategory>>> {
    product::list_by_restaurant(&state.database, restaurant_id)
        .await
        .map(Json)
}

/// `GET /products/:product_id` - public fields only, `null` when missing
pub async fn show(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<i64>,
) -> Result<Json<Option<PublicProduct>>> {
    product::get_public(&state.database, product_id)
        .await
        .map(Json)
}

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProduct>,
) -> Result<Json<ProductModel>> {
    product::create(&state.database, payload).await.map(Json)
}

/// `PUT /products/:product_id`
pub async fn update(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<i64>,
    ApiJson(changes): ApiJson<ProductChanges>,
) -> Result<Json<Option<ProductModel>>> {
    product::update(&state.database, product_id, changes)
        .await
        .map(Json)
}

/// `DELETE /products/:product_id`
pub async fn destroy(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<i64>,
    body: Option<Json<DestroyRequest>>,
) -> Result<Json<String>> {
    let hint = body.and_then(|Json(request)| request.restaurant_id);
    product::destroy(&state.database, product_id, hint)
        .await
        .map(Json)
}

/// `GET /products/popular`
pub async fn popular(State(state): State<AppState>) -> Result<Json<Vec<PopularProduct>>> {
    popularity::popular_products(&state.database).await.map(Json)
}
