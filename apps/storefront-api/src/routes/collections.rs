//! Collection handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use storefront_core::{CollectionSummary, CoreError, NewCollection, ValidationError, ValidationErrors};

use crate::dto::{CollectionDto, CollectionPayload, MessageBody};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, IdPath};
use crate::state::AppState;

/// `GET /collections`: ordered by id, each with its product count.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<CollectionDto>>> {
    let collections = state.db.collections().list_with_counts().await?;
    Ok(Json(collections.into_iter().map(CollectionDto::from).collect()))
}

/// `POST /collections`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CollectionPayload>,
) -> ApiResult<(StatusCode, Json<CollectionDto>)> {
    let new = payload.resolve(None)?;
    if let Some(product_id) = new.featured_product_id {
        ensure_featurable(&state, None, product_id).await?;
    }

    let collection = state.db.collections().insert(&new).await?;

    info!(id = collection.id, title = %collection.title, "Collection created");
    let summary = CollectionSummary {
        id: collection.id,
        title: collection.title,
        featured_product_id: collection.featured_product_id,
        products_count: 0,
    };
    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// `GET /collections/{id}`
pub async fn retrieve(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<CollectionDto>> {
    let summary = state
        .db
        .collections()
        .get_with_count(id)
        .await?
        .ok_or(CoreError::CollectionNotFound(id))?;

    Ok(Json(summary.into()))
}

/// `PUT /collections/{id}`: title required; an absent `featured_product`
/// keeps the stored one, `null` clears it.
pub async fn replace(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<CollectionPayload>,
) -> ApiResult<Json<CollectionDto>> {
    let existing = state
        .db
        .collections()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CollectionNotFound(id))?;

    let keep_featured = payload.featured_product.is_none();
    let mut new = payload.resolve(None)?;
    if keep_featured {
        new.featured_product_id = existing.featured_product_id;
    }
    save(&state, id, new).await
}

/// `PATCH /collections/{id}`: absent fields keep their stored value.
pub async fn patch(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<CollectionPayload>,
) -> ApiResult<Json<CollectionDto>> {
    let existing = state
        .db
        .collections()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CollectionNotFound(id))?;

    let new = payload.resolve(Some(&existing))?;
    save(&state, id, new).await
}

/// `DELETE /collections/{id}`: refused with 409 while products remain.
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<(StatusCode, Json<MessageBody>)> {
    let collection = state.db.collections().delete_if_empty(id).await?;

    info!(id = collection.id, title = %collection.title, "Collection deleted");
    Ok((
        StatusCode::NO_CONTENT,
        Json(MessageBody::deleted(collection.id, &collection.title)),
    ))
}

async fn save(state: &AppState, id: i64, new: NewCollection) -> ApiResult<Json<CollectionDto>> {
    if let Some(product_id) = new.featured_product_id {
        ensure_featurable(state, Some(id), product_id).await?;
    }

    state
        .db
        .collections()
        .update(id, &new)
        .await
        .map_err(|e| match new.featured_product_id {
            Some(product_id) => ApiError::from_reference(e, "featured_product", product_id),
            None => e.into(),
        })?;

    let summary = state
        .db
        .collections()
        .get_with_count(id)
        .await?
        .ok_or(CoreError::CollectionNotFound(id))?;

    info!(id = id, "Collection updated");
    Ok(Json(summary.into()))
}

/// A featured product must exist and belong to the collection featuring it.
async fn ensure_featurable(
    state: &AppState,
    collection_id: Option<i64>,
    product_id: i64,
) -> ApiResult<()> {
    let error = match state.db.products().get_by_id(product_id).await? {
        None => ValidationError::DoesNotExist {
            field: "featured_product".to_string(),
            id: product_id,
        },
        Some(product) if Some(product.collection_id) != collection_id => {
            ValidationError::NotAllowed {
                field: "featured_product".to_string(),
                reason: format!("product {} does not belong to this collection", product_id),
            }
        }
        Some(_) => return Ok(()),
    };

    Err(ValidationErrors::from(error).into())
}
