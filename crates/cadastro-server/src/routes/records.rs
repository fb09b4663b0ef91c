//! Record CRUD routes, generic over the entity schema held in state.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// Success confirmation body
#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub mensagem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// List all records
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(state.store.list()?))
}

/// Get a record by id
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let record = state
        .store
        .get(id)?
        .ok_or_else(|| ApiError::not_found(state.schema.not_found_message()))?;

    Ok(Json(record))
}

/// Create a record
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Confirmation>), ApiError> {
    let fields = request_object(&body)?;
    let row = state.schema.create_row(fields)?;
    let id = state.store.insert(&row)?;

    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            mensagem: state.schema.created_message(),
            id: Some(id),
        }),
    ))
}

/// Partially update a record
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Confirmation>, ApiError> {
    let fields = request_object(&body)?;
    if fields.is_empty() {
        return Err(ApiError::validation("Requisição sem dados"));
    }

    if !state.store.exists(id)? {
        return Err(ApiError::not_found(state.schema.not_found_message()));
    }

    let patch = state.schema.update_patch(fields)?;
    state.store.update(id, &patch)?;

    Ok(Json(Confirmation {
        mensagem: state.schema.updated_message(),
        id: None,
    }))
}

/// Delete a record
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Confirmation>, ApiError> {
    if !state.store.exists(id)? {
        return Err(ApiError::not_found(state.schema.not_found_message()));
    }

    state.store.delete(id)?;

    Ok(Json(Confirmation {
        mensagem: state.schema.deleted_message(),
        id: None,
    }))
}

/// Reject request bodies that are not a JSON object
fn request_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::validation("Requisição sem dados"))
}
