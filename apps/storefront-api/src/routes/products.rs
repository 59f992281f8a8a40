//! Product handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use storefront_core::validation::validate_page_limit;
use storefront_core::{CoreError, NewProduct, ValidationError, ValidationErrors};

use crate::dto::{ListParams, MessageBody, ProductDto, ProductPayload};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery, IdPath};
use crate::state::AppState;

/// `GET /products`: newest first, limited to the page size.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let limit = match params.limit {
        Some(limit) => Some(validate_page_limit(limit).map_err(ValidationErrors::from)?),
        None => state.config.product_page_size,
    };

    let products = state.db.products().list(limit).await?;

    Ok(Json(
        products
            .into_iter()
            .map(|p| ProductDto::new(p, &state.config))
            .collect(),
    ))
}

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let new = payload.resolve(None)?;
    ensure_collection_exists(&state, new.collection_id).await?;

    let product = state
        .db
        .products()
        .insert(&new)
        .await
        .map_err(|e| ApiError::from_reference(e, "collection", new.collection_id))?;

    info!(id = product.id, title = %product.title, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(ProductDto::new(product, &state.config)),
    ))
}

/// `GET /products/{id}`
pub async fn retrieve(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProductDto>> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    Ok(Json(ProductDto::new(product, &state.config)))
}

/// `PUT /products/{id}`: every field required.
pub async fn replace(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> ApiResult<Json<ProductDto>> {
    if state.db.products().get_by_id(id).await?.is_none() {
        return Err(CoreError::ProductNotFound(id).into());
    }

    let new = payload.resolve(None)?;
    save(&state, id, new).await
}

/// `PATCH /products/{id}`: absent fields keep their stored value.
pub async fn patch(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> ApiResult<Json<ProductDto>> {
    let existing = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    let new = payload.resolve(Some(&existing))?;
    save(&state, id, new).await
}

/// `DELETE /products/{id}`
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<(StatusCode, Json<MessageBody>)> {
    let product = state.db.products().delete(id).await?;

    info!(id = product.id, title = %product.title, "Product deleted");
    Ok((
        StatusCode::NO_CONTENT,
        Json(MessageBody::deleted(product.id, &product.title)),
    ))
}

async fn save(state: &AppState, id: i64, new: NewProduct) -> ApiResult<Json<ProductDto>> {
    ensure_collection_exists(state, new.collection_id).await?;

    let product = state
        .db
        .products()
        .update(id, &new)
        .await
        .map_err(|e| ApiError::from_reference(e, "collection", new.collection_id))?;

    info!(id = product.id, "Product updated");
    Ok(Json(ProductDto::new(product, &state.config)))
}

async fn ensure_collection_exists(state: &AppState, collection_id: i64) -> ApiResult<()> {
    if state.db.collections().exists(collection_id).await? {
        Ok(())
    } else {
        Err(ApiError::from(ValidationErrors::from(
            ValidationError::DoesNotExist {
                field: "collection".to_string(),
                id: collection_id,
            },
        )))
    }
}
