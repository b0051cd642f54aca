use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::bookings;
use crate::state::AppState;

// GET /admin/bookings
#[derive(Serialize)]
pub struct BookingsResponse {
    bookings: Vec<Booking>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BookingsResponse>, AppError> {
    state.admin.verify(&headers)?;

    let all = {
        let db = state.conn()?;
        bookings::list_all(&db)?
    };

    Ok(Json(BookingsResponse { bookings: all }))
}

// PUT /admin/bookings
#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct StatusUpdateResponse {
    success: bool,
    message: String,
    booking: Booking,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    state.admin.verify(&headers)?;
    let Json(body) = body?;

    let id = body.id.filter(|id| *id > 0);
    let (Some(id), Some(status)) = (id, body.status.as_deref()) else {
        return Err(AppError::validation("id and status are required"));
    };
    let target = match BookingStatus::parse(status) {
        Some(s @ (BookingStatus::Confirmed | BookingStatus::Cancelled)) => s,
        _ => {
            return Err(AppError::validation(
                "invalid status, use \"confirmed\" or \"cancelled\"",
            ))
        }
    };

    let booking = {
        let mut db = state.conn()?;
        bookings::transition_booking(&mut db, id, target)?
    };

    Ok(Json(StatusUpdateResponse {
        success: true,
        message: format!("booking {} {}", booking.id, booking.status.as_str()),
        booking,
    }))
}

// DELETE /admin/bookings
#[derive(Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i64>,
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.admin.verify(&headers)?;
    let Json(body) = body?;

    let id = body
        .id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation("id is required"))?;

    {
        let db = state.conn()?;
        bookings::delete_booking(&db, id)?;
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("booking {id} deleted"),
    })))
}
