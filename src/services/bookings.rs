use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use rusqlite::{Connection, TransactionBehavior};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingRequest, BookingStatus, ConflictingBooking, NewBooking, Slot};
use crate::services::conflicts;

/// Bookings go straight to confirmed on submit; there is no approval queue.
pub const INITIAL_STATUS: BookingStatus = BookingStatus::Confirmed;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn present(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `HH:MM` only, so that string comparison agrees with clock order.
fn parse_clock(field: &str, value: &str) -> Result<String, AppError> {
    if value.len() != 5 || NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        return Err(AppError::validation(format!(
            "{field} must be a time in HH:MM format"
        )));
    }
    Ok(value.to_string())
}

/// Checks run in order and the first failure wins: required fields, email
/// shape, event date not in the past, well-formed time range.
pub fn validate(req: &BookingRequest, today: NaiveDate) -> Result<NewBooking, AppError> {
    let required = [
        ("name", &req.name),
        ("event_date", &req.event_date),
        ("event_type", &req.event_type),
        ("street_name", &req.street_name),
        ("street_number", &req.street_number),
        ("start_time", &req.start_time),
        ("end_time", &req.end_time),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let email = present(&req.email);
    if let Some(email) = &email {
        if !is_valid_email(email) {
            return Err(AppError::validation("invalid email format"));
        }
    }

    let date_str = present(&req.event_date).unwrap_or_default();
    let event_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation("event_date must be a date in YYYY-MM-DD format"))?;
    if event_date < today {
        return Err(AppError::validation("event date must be today or later"));
    }

    let start_time = parse_clock("start_time", &present(&req.start_time).unwrap_or_default())?;
    let end_time = parse_clock("end_time", &present(&req.end_time).unwrap_or_default())?;
    if end_time < start_time {
        return Err(AppError::validation("end_time must not be before start_time"));
    }

    Ok(NewBooking {
        name: present(&req.name).unwrap_or_default(),
        email,
        phone: present(&req.phone),
        street_name: present(&req.street_name).unwrap_or_default(),
        street_number: present(&req.street_number).unwrap_or_default(),
        event_type: present(&req.event_type).unwrap_or_default(),
        event_date,
        start_time,
        end_time,
        message: present(&req.message),
    })
}

fn conflict_error(slot: &Slot<'_>, conflicts: &[Booking]) -> AppError {
    AppError::Conflict {
        conflicts: conflicts.iter().map(ConflictingBooking::from).collect(),
        requested_time: slot.time_range(),
    }
}

/// Validates, checks for overlaps and inserts, in that order. The check and
/// the insert share one immediate transaction, so two concurrent requests
/// for the same slot cannot both pass the check.
pub fn create_booking(
    conn: &mut Connection,
    req: &BookingRequest,
    today: NaiveDate,
) -> Result<Booking, AppError> {
    let new_booking = validate(req, today)?;
    let slot = new_booking.slot();

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let conflicts = conflicts::check_conflict(&tx, &slot, None)?;
    if !conflicts.is_empty() {
        tracing::warn!(
            date = %slot.event_date,
            requested = %slot.time_range(),
            conflicts = conflicts.len(),
            "booking rejected: slot taken"
        );
        return Err(conflict_error(&slot, &conflicts));
    }

    let booking = queries::insert_booking(&tx, &new_booking, INITIAL_STATUS)?;
    tx.commit()?;

    tracing::info!(
        id = booking.id,
        date = %booking.event_date,
        time = %booking.time_range(),
        "booking created"
    );
    Ok(booking)
}

/// Administrator status change. Only `confirmed` and `cancelled` are valid
/// targets. Reactivating a cancelled booking re-runs the conflict check
/// against every other active booking.
pub fn transition_booking(
    conn: &mut Connection,
    id: i64,
    target: BookingStatus,
) -> Result<Booking, AppError> {
    if target == BookingStatus::Pending {
        return Err(AppError::validation(
            "invalid status, use \"confirmed\" or \"cancelled\"",
        ));
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let current = queries::get_booking_by_id(&tx, id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    if target.is_active() && !current.status.is_active() {
        let slot = Slot {
            event_date: current.event_date,
            start_time: &current.start_time,
            end_time: &current.end_time,
        };
        let conflicts = conflicts::check_conflict(&tx, &slot, Some(id))?;
        if !conflicts.is_empty() {
            tracing::warn!(id, conflicts = conflicts.len(), "reactivation rejected: slot taken");
            return Err(conflict_error(&slot, &conflicts));
        }
    }

    let updated = queries::update_booking_status(&tx, id, target)?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;
    tx.commit()?;

    tracing::info!(
        id,
        from = current.status.as_str(),
        to = updated.status.as_str(),
        "booking status changed"
    );
    Ok(updated)
}

pub fn delete_booking(conn: &Connection, id: i64) -> Result<(), AppError> {
    if !queries::delete_booking(conn, id)? {
        return Err(AppError::NotFound(format!("booking {id}")));
    }
    tracing::info!(id, "booking deleted");
    Ok(())
}

/// Admin view: every booking, any status, by event date.
pub fn list_all(conn: &Connection) -> Result<Vec<Booking>, AppError> {
    Ok(queries::list_all_bookings(conn)?)
}

/// Public view: active bookings from today on, by event date.
pub fn list_public(conn: &Connection, today: NaiveDate) -> Result<Vec<Booking>, AppError> {
    Ok(queries::list_upcoming_active_bookings(conn, today)?)
}
