//! Villa CRUD handlers.
//!
//! Every handler follows validate → locate → mutate → respond against the
//! repository in `AppState`. Failures map to status codes via `AppError`.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use service_core::error::{AppError, ErrorResponse};
use service_core::extract::JsonBody;
use validator::Validate;

use crate::models::{PatchOperation, Villa, VillaDto, VillaPatch};
use crate::services::metrics::record_operation;
use crate::AppState;

pub const VILLAS_PATH: &str = "/villas";

/// Location of a villa, as returned in the `Location` header on create.
pub fn villa_location(id: i64) -> String {
    format!("{}/{}", VILLAS_PATH, id)
}

fn require_positive_id(id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::bad_request(format!("Invalid villa id: {}", id)));
    }
    Ok(())
}

/// GET /villas
#[utoipa::path(
    get,
    path = "/villas",
    responses(
        (status = 200, description = "All villas ordered by id", body = Vec<Villa>)
    ),
    tag = "Villas"
)]
pub async fn list_villas(State(state): State<AppState>) -> Result<Json<Vec<Villa>>, AppError> {
    tracing::info!("Getting all villas");

    Ok(Json(state.villas.list().await?))
}

/// GET /villas/:id
#[utoipa::path(
    get,
    path = "/villas/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    responses(
        (status = 200, description = "The villa", body = Villa),
        (status = 400, description = "Id is not a positive integer", body = ErrorResponse),
        (status = 404, description = "Villa not found", body = ErrorResponse)
    ),
    tag = "Villas"
)]
pub async fn get_villa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Villa>, AppError> {
    tracing::info!(villa_id = id, "Getting the single villa");
    require_positive_id(id)?;

    let villa = state
        .villas
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Villa not found"))?;

    Ok(Json(villa))
}

/// POST /villas
#[utoipa::path(
    post,
    path = "/villas",
    request_body = VillaDto,
    responses(
        (status = 201, description = "Villa created", body = Villa,
            headers(("Location" = String, description = "Path of the new villa"))),
        (status = 400, description = "Malformed payload, invalid name or duplicate name", body = ErrorResponse),
        (status = 500, description = "Payload carried a server-assigned id", body = ErrorResponse)
    ),
    tag = "Villas"
)]
pub async fn create_villa(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<VillaDto>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Villa>), AppError> {
    if state.villas.name_taken(&payload.name, None).await? {
        return Err(AppError::bad_request("This Name already exists"));
    }

    payload.validate()?;

    if payload.id > 0 {
        return Err(AppError::InternalError(anyhow::anyhow!(
            "Villa id is assigned by the server, got {}",
            payload.id
        )));
    }

    let villa = state.villas.insert(payload).await?;
    record_operation("create");
    tracing::info!(villa_id = villa.id, "New villa created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, villa_location(villa.id))],
        Json(villa),
    ))
}

/// PUT /villas/:id
#[utoipa::path(
    put,
    path = "/villas/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    request_body = VillaDto,
    responses(
        (status = 204, description = "Villa replaced"),
        (status = 400, description = "Id mismatch, malformed or invalid payload", body = ErrorResponse),
        (status = 404, description = "Villa not found", body = ErrorResponse)
    ),
    tag = "Villas"
)]
pub async fn update_villa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<VillaDto>,
) -> Result<StatusCode, AppError> {
    if id != payload.id {
        return Err(AppError::bad_request(format!(
            "Villa id {} does not match payload id {}",
            id, payload.id
        )));
    }

    let mut villa = state
        .villas
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Villa not found"))?;

    payload.validate()?;

    if state.villas.name_taken(&payload.name, Some(id)).await? {
        return Err(AppError::bad_request("This Name already exists"));
    }

    villa.apply(payload);
    if !state.villas.replace(villa).await? {
        return Err(AppError::not_found("Villa not found"));
    }

    record_operation("update");
    tracing::info!(villa_id = id, "Villa updated");

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /villas/:id
#[utoipa::path(
    patch,
    path = "/villas/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 204, description = "Patch applied"),
        (status = 400, description = "Bad id, unknown villa, or a patch that fails or leaves the villa invalid", body = ErrorResponse)
    ),
    tag = "Villas"
)]
pub async fn patch_villa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<VillaPatch>,
) -> Result<StatusCode, AppError> {
    require_positive_id(id)?;

    // A missing villa is a bad request here, not a 404.
    let villa = state
        .villas
        .get(id)
        .await?
        .ok_or_else(|| AppError::bad_request("Villa not found"))?;

    let patched = patch
        .apply(&villa)
        .map_err(|e| AppError::BadRequest(e.into()))?;

    patched.validate()?;

    if state.villas.name_taken(&patched.name, Some(id)).await? {
        return Err(AppError::bad_request("This Name already exists"));
    }

    if !state.villas.replace(patched).await? {
        return Err(AppError::bad_request("Villa not found"));
    }

    record_operation("patch");
    tracing::info!(villa_id = id, "Villa partially updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /villas/:id
#[utoipa::path(
    delete,
    path = "/villas/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    responses(
        (status = 200, description = "Villa deleted"),
        (status = 400, description = "Id is not a positive integer", body = ErrorResponse),
        (status = 404, description = "Villa not found", body = ErrorResponse)
    ),
    tag = "Villas"
)]
pub async fn delete_villa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_positive_id(id)?;

    state
        .villas
        .remove(id)
        .await?
        .ok_or_else(|| AppError::not_found("Villa not found"))?;

    record_operation("delete");
    tracing::info!(villa_id = id, "Villa deleted");

    Ok(StatusCode::OK)
}
