use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingRequest, CalendarDay, PublicSlot};
use crate::services::{availability, bookings};
use crate::state::AppState;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// POST /bookings
#[derive(Serialize)]
pub struct CreatedResponse {
    success: bool,
    message: &'static str,
    booking: Booking,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, AppError> {
    let Json(req) = body?;

    let booking = {
        let mut db = state.conn()?;
        bookings::create_booking(&mut db, &req, today())?
    };

    Ok(Json(CreatedResponse {
        success: true,
        message: "Booking confirmed. Your reservation is secured.",
        booking,
    }))
}

// GET /bookings
#[derive(Serialize)]
pub struct PublicBookingsResponse {
    bookings: Vec<PublicSlot>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicBookingsResponse>, AppError> {
    let upcoming = {
        let db = state.conn()?;
        bookings::list_public(&db, today())?
    };

    Ok(Json(PublicBookingsResponse {
        bookings: upcoming.into_iter().map(PublicSlot::from).collect(),
    }))
}

// GET /availability?year=2025&month=9
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    year: i32,
    month: u32,
    capacity: usize,
    days: Vec<CalendarDay>,
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let Query(query) = query?;
    let today = today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    if !(1..=12).contains(&month) {
        return Err(AppError::validation("month must be between 1 and 12"));
    }
    let (start, end) = availability::grid_bounds(year, month)
        .ok_or_else(|| AppError::validation(format!("year {year} is out of range")))?;

    let active = {
        let db = state.conn()?;
        queries::active_bookings_between(&db, start, end)?
    };

    let capacity = state.config.day_capacity;
    let days = availability::project_month(&active, year, month, today, capacity)
        .ok_or_else(|| AppError::validation(format!("year {year} is out of range")))?;

    Ok(Json(AvailabilityResponse {
        year,
        month,
        capacity,
        days,
    }))
}
