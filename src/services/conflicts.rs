use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, Slot};

/// Half-open overlap: `[s1, e1)` and `[s2, e2)` share an instant iff
/// `s1 < e2 && e1 > s2`. Touching ranges never overlap, and an empty range
/// (`start == end`) holds no instant so it never blocks or gets blocked.
pub fn overlaps(start_a: &str, end_a: &str, start_b: &str, end_b: &str) -> bool {
    if start_a == end_a || start_b == end_b {
        return false;
    }
    start_a < end_b && end_a > start_b
}

/// Every active booking in `existing` that overlaps `slot` on the same date.
/// `exclude_id` leaves one booking out, so a booking never conflicts with itself.
pub fn filter_conflicts(existing: &[Booking], slot: &Slot<'_>, exclude_id: Option<i64>) -> Vec<Booking> {
    existing
        .iter()
        .filter(|b| Some(b.id) != exclude_id)
        .filter(|b| b.status.is_active() && b.event_date == slot.event_date)
        .filter(|b| overlaps(slot.start_time, slot.end_time, &b.start_time, &b.end_time))
        .cloned()
        .collect()
}

/// Reads the active bookings on the slot's date and returns the ones it
/// would overlap. An empty result means the slot is free.
pub fn check_conflict(
    conn: &Connection,
    slot: &Slot<'_>,
    exclude_id: Option<i64>,
) -> anyhow::Result<Vec<Booking>> {
    let existing = queries::active_bookings_on(conn, slot.event_date)?;
    Ok(filter_conflicts(&existing, slot, exclude_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{BookingStatus, NewBooking};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slot<'a>(day: &str, start: &'a str, end: &'a str) -> Slot<'a> {
        Slot {
            event_date: date(day),
            start_time: start,
            end_time: end,
        }
    }

    fn seed(conn: &Connection, day: &str, start: &str, end: &str, status: BookingStatus) -> Booking {
        let booking = NewBooking {
            name: "Existing".to_string(),
            email: None,
            phone: None,
            street_name: "Havevej".to_string(),
            street_number: "3".to_string(),
            event_type: "wedding".to_string(),
            event_date: date(day),
            start_time: start.to_string(),
            end_time: end.to_string(),
            message: None,
        };
        queries::insert_booking(conn, &booking, status).unwrap()
    }

    #[test]
    fn test_overlap_rule() {
        assert!(overlaps("13:00", "15:00", "14:00", "18:00"));
        assert!(overlaps("14:00", "18:00", "14:00", "18:00"));
        assert!(overlaps("15:00", "16:00", "14:00", "18:00"));
        assert!(overlaps("10:00", "20:00", "14:00", "18:00"));
        assert!(!overlaps("10:00", "14:00", "14:00", "18:00"));
        assert!(!overlaps("18:00", "20:00", "14:00", "18:00"));
    }

    #[test]
    fn test_zero_duration_never_overlaps() {
        assert!(!overlaps("15:00", "15:00", "14:00", "18:00"));
        assert!(!overlaps("14:00", "18:00", "15:00", "15:00"));
    }

    #[test]
    fn test_touching_boundary_is_free() {
        let conn = db::init_db(":memory:").unwrap();
        seed(&conn, "2025-09-15", "14:00", "18:00", BookingStatus::Confirmed);

        let conflicts = check_conflict(&conn, &slot("2025-09-15", "10:00", "14:00"), None).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_overlap_reports_every_conflict() {
        let conn = db::init_db(":memory:").unwrap();
        let a = seed(&conn, "2025-09-15", "10:00", "12:00", BookingStatus::Confirmed);
        let b = seed(&conn, "2025-09-15", "14:00", "18:00", BookingStatus::Pending);
        seed(&conn, "2025-09-15", "19:00", "22:00", BookingStatus::Confirmed);

        let conflicts = check_conflict(&conn, &slot("2025-09-15", "11:00", "15:00"), None).unwrap();
        let ids: Vec<i64> = conflicts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_cancelled_booking_does_not_block() {
        let conn = db::init_db(":memory:").unwrap();
        seed(&conn, "2025-09-15", "14:00", "18:00", BookingStatus::Cancelled);

        let conflicts = check_conflict(&conn, &slot("2025-09-15", "14:00", "18:00"), None).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_other_dates_do_not_block() {
        let conn = db::init_db(":memory:").unwrap();
        seed(&conn, "2025-09-16", "14:00", "18:00", BookingStatus::Confirmed);

        let conflicts = check_conflict(&conn, &slot("2025-09-15", "14:00", "18:00"), None).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_excluded_booking_is_ignored() {
        let conn = db::init_db(":memory:").unwrap();
        let own = seed(&conn, "2025-09-15", "14:00", "18:00", BookingStatus::Confirmed);

        let conflicts =
            check_conflict(&conn, &slot("2025-09-15", "14:00", "18:00"), Some(own.id)).unwrap();
        assert!(conflicts.is_empty());
    }
}
