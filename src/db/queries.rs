use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, ContentEntry, NewBooking};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BOOKING_COLUMNS: &str = "id, name, email, phone, street_name, street_number, event_type, \
     event_date, start_time, end_time, message, status, created_at";

// ── Bookings ──

pub fn insert_booking(
    conn: &Connection,
    booking: &NewBooking,
    status: BookingStatus,
) -> anyhow::Result<Booking> {
    let event_date = booking.event_date.format(DATE_FORMAT).to_string();
    let created_at = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO bookings (name, email, phone, street_name, street_number, event_type, event_date, start_time, end_time, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            booking.name,
            booking.email,
            booking.phone,
            booking.street_name,
            booking.street_number,
            booking.event_type,
            event_date,
            booking.start_time,
            booking.end_time,
            booking.message,
            status.as_str(),
            created_at,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_booking_by_id(conn, id)?.with_context(|| format!("booking {id} missing right after insert"))
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Pending and confirmed bookings on `date`, earliest start first.
pub fn active_bookings_on(conn: &Connection, date: NaiveDate) -> anyhow::Result<Vec<Booking>> {
    let date_str = date.format(DATE_FORMAT).to_string();
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE event_date = ?1 AND status IN ('pending', 'confirmed')
         ORDER BY start_time ASC"
    ))?;

    let rows = stmt.query_map(params![date_str], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Pending and confirmed bookings with `from <= event_date <= to`.
pub fn active_bookings_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let from_str = from.format(DATE_FORMAT).to_string();
    let to_str = to.format(DATE_FORMAT).to_string();
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE event_date >= ?1 AND event_date <= ?2 AND status IN ('pending', 'confirmed')
         ORDER BY event_date ASC, start_time ASC"
    ))?;

    let rows = stmt.query_map(params![from_str, to_str], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Active bookings dated `from` or later, for the public availability view.
pub fn list_upcoming_active_bookings(
    conn: &Connection,
    from: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let from_str = from.format(DATE_FORMAT).to_string();
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE event_date >= ?1 AND status IN ('pending', 'confirmed')
         ORDER BY event_date ASC, start_time ASC"
    ))?;

    let rows = stmt.query_map(params![from_str], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn list_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY event_date ASC, start_time ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Returns the updated row, or `None` when no booking has that id.
pub fn update_booking_status(
    conn: &Connection,
    id: i64,
    status: BookingStatus,
) -> anyhow::Result<Option<Booking>> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    if count == 0 {
        return Ok(None);
    }
    get_booking_by_id(conn, id)
}

pub fn delete_booking(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let event_date_str: String = row.get(7)?;
    let status_str: String = row.get(11)?;
    let created_at_str: String = row.get(12)?;

    let event_date = NaiveDate::parse_from_str(&event_date_str, DATE_FORMAT)
        .with_context(|| format!("malformed event_date in store: {event_date_str}"))?;
    let status = BookingStatus::parse(&status_str)
        .with_context(|| format!("unknown booking status in store: {status_str}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .with_context(|| format!("malformed created_at in store: {created_at_str}"))?;

    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        street_name: row.get(4)?,
        street_number: row.get(5)?,
        event_type: row.get(6)?,
        event_date,
        start_time: row.get(8)?,
        end_time: row.get(9)?,
        message: row.get(10)?,
        status,
        created_at,
    })
}

// ── Site Content ──

pub fn list_content(conn: &Connection) -> anyhow::Result<Vec<ContentEntry>> {
    let mut stmt = conn.prepare("SELECT key, value FROM site_content ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(ContentEntry {
            key: row.get(0)?,
            value: row.get(1)?,
        })
    })?;

    let mut entries = vec![];
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

pub fn upsert_content(conn: &Connection, key: &str, value: &str) -> anyhow::Result<ContentEntry> {
    conn.execute(
        "INSERT INTO site_content (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(ContentEntry {
        key: key.to_string(),
        value: value.to_string(),
    })
}
