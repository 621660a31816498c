/// Product catalog endpoints
///
/// # Endpoints
///
/// - `GET /api/products` - List products, newest first (public)
/// - `POST /api/products` - Create a product (admin)
/// - `PUT /api/products/:id` - Partially update a product (admin)
/// - `DELETE /api/products/:id` - Delete a product (admin)
///
/// `PUT` takes any subset of `name`, `description`, `price` and `image_url`;
/// sending `"image_url": null` removes the image.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ApiJson,
    middleware::auth::AuthContext,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use mehndi_shared::models::product::{CreateProduct, DeletedProduct, Product, UpdateProduct};
use tracing::info;
use validator::Validate;

/// Lists every product
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.store.list_products().await?;
    Ok(Json(products))
}

/// Creates a product
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty name or negative price
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    req.validate()?;

    let product = state.store.create_product(req).await?;

    info!(product_id = %product.id, admin = %auth.email, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Applies a partial update to a product
///
/// # Errors
///
/// - `404 Not Found`: unknown id
/// - `422 Unprocessable Entity`: empty name or negative price
pub async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateProduct>,
) -> ApiResult<Json<Product>> {
    req.validate()?;

    let product = state.store.update_product(&id, req).await?;

    info!(product_id = %product.id, admin = %auth.email, "Product updated");
    Ok(Json(product))
}

/// Deletes a product, returning its id and name
///
/// # Errors
///
/// - `404 Not Found`: unknown id
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedProduct>> {
    let deleted = state.store.delete_product(&id).await?;

    info!(product_id = %deleted.id, admin = %auth.email, "Product deleted");
    Ok(Json(deleted))
}
