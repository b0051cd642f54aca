use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::ContentEntry;
use crate::state::AppState;

// GET /content
#[derive(Serialize)]
pub struct ContentResponse {
    content: BTreeMap<String, String>,
}

pub async fn get_content(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContentResponse>, AppError> {
    let entries = {
        let db = state.conn()?;
        queries::list_content(&db)?
    };

    Ok(Json(ContentResponse {
        content: entries.into_iter().map(|e| (e.key, e.value)).collect(),
    }))
}

// PUT /content
#[derive(Deserialize)]
pub struct ContentUpdateRequest {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Serialize)]
pub struct ContentUpdateResponse {
    success: bool,
    message: &'static str,
    content: ContentEntry,
}

pub async fn put_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<ContentUpdateRequest>, JsonRejection>,
) -> Result<Json<ContentUpdateResponse>, AppError> {
    state.admin.verify(&headers)?;
    let Json(body) = body?;

    let key = body.key.as_deref().map(str::trim).unwrap_or("");
    let value = match body.value.as_deref() {
        Some(value) if !key.is_empty() => value,
        _ => return Err(AppError::validation("key and value are required")),
    };

    let entry = {
        let db = state.conn()?;
        queries::upsert_content(&db, key, value)?
    };
    tracing::info!(key = %entry.key, "site content updated");

    Ok(Json(ContentUpdateResponse {
        success: true,
        message: "content updated",
        content: entry,
    }))
}
