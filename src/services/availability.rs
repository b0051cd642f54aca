use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{Booking, CalendarDay, DayStatus};

/// Six weeks, Sunday first.
pub const GRID_DAYS: u64 = 42;

/// First and last date of the 42-day grid for `year`/`month`, or `None`
/// for a month outside 1..=12.
pub fn grid_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(lead))?;
    let end = start.checked_add_days(Days::new(GRID_DAYS - 1))?;
    Some((start, end))
}

/// Coarse per-day classification for the calendar. Counts active bookings
/// per date and compares against `capacity`; it ignores times entirely.
pub fn project_month(
    bookings: &[Booking],
    year: i32,
    month: u32,
    today: NaiveDate,
    capacity: usize,
) -> Option<Vec<CalendarDay>> {
    let (start, _) = grid_bounds(year, month)?;

    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for booking in bookings.iter().filter(|b| b.status.is_active()) {
        *per_day.entry(booking.event_date).or_default() += 1;
    }

    let days = start
        .iter_days()
        .take(GRID_DAYS as usize)
        .map(|date| {
            let in_current_month = date.year() == year && date.month() == month;
            let booking_count = per_day.get(&date).copied().unwrap_or(0);
            CalendarDay {
                date,
                in_current_month,
                is_today: date == today,
                booking_count,
                status: classify(in_current_month, date < today, booking_count, capacity),
            }
        })
        .collect();

    Some(days)
}

fn classify(in_current_month: bool, in_past: bool, count: usize, capacity: usize) -> DayStatus {
    if !in_current_month || in_past {
        DayStatus::Unavailable
    } else if count >= capacity {
        DayStatus::FullyBooked
    } else if count > 0 {
        DayStatus::PartiallyBooked
    } else {
        DayStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::NaiveDateTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(id: i64, day: &str, status: BookingStatus) -> Booking {
        Booking {
            id,
            name: "Guest".to_string(),
            email: None,
            phone: None,
            street_name: "Havevej".to_string(),
            street_number: "1".to_string(),
            event_type: "party".to_string(),
            event_date: date(day),
            start_time: format!("{:02}:00", 8 + id),
            end_time: format!("{:02}:30", 8 + id),
            message: None,
            status,
            created_at: NaiveDateTime::parse_from_str("2025-08-01 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    fn day<'a>(grid: &'a [CalendarDay], s: &str) -> &'a CalendarDay {
        grid.iter().find(|d| d.date == date(s)).unwrap()
    }

    #[test]
    fn test_grid_shape() {
        // September 2025 starts on a Monday, so the grid opens on Sunday Aug 31.
        let (start, end) = grid_bounds(2025, 9).unwrap();
        assert_eq!(start, date("2025-08-31"));
        assert_eq!(end, date("2025-10-11"));

        let grid = project_month(&[], 2025, 9, date("2025-09-01"), 3).unwrap();
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.iter().filter(|d| d.in_current_month).count(), 30);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_lead() {
        // June 2025 starts on a Sunday.
        let (start, _) = grid_bounds(2025, 6).unwrap();
        assert_eq!(start, date("2025-06-01"));
    }

    #[test]
    fn test_invalid_month() {
        assert!(grid_bounds(2025, 13).is_none());
        assert!(project_month(&[], 2025, 0, date("2025-09-01"), 3).is_none());
    }

    #[test]
    fn test_capacity_classes() {
        let bookings = vec![
            booking(1, "2025-09-15", BookingStatus::Confirmed),
            booking(2, "2025-09-15", BookingStatus::Pending),
            booking(3, "2025-09-15", BookingStatus::Confirmed),
            booking(4, "2025-09-16", BookingStatus::Confirmed),
            booking(5, "2025-09-17", BookingStatus::Confirmed),
            booking(6, "2025-09-17", BookingStatus::Confirmed),
            booking(7, "2025-09-18", BookingStatus::Cancelled),
        ];
        let grid = project_month(&bookings, 2025, 9, date("2025-09-01"), 3).unwrap();

        assert_eq!(day(&grid, "2025-09-15").status, DayStatus::FullyBooked);
        assert_eq!(day(&grid, "2025-09-16").status, DayStatus::PartiallyBooked);
        assert_eq!(day(&grid, "2025-09-17").status, DayStatus::PartiallyBooked);
        assert_eq!(day(&grid, "2025-09-18").status, DayStatus::Available);
        assert_eq!(day(&grid, "2025-09-18").booking_count, 0);
    }

    #[test]
    fn test_past_and_adjacent_month_days_unavailable() {
        let bookings = vec![booking(1, "2025-09-20", BookingStatus::Confirmed)];
        let grid = project_month(&bookings, 2025, 9, date("2025-09-10"), 3).unwrap();

        assert_eq!(day(&grid, "2025-09-09").status, DayStatus::Unavailable);
        assert_eq!(day(&grid, "2025-08-31").status, DayStatus::Unavailable);
        assert_eq!(day(&grid, "2025-10-01").status, DayStatus::Unavailable);

        let today = day(&grid, "2025-09-10");
        assert!(today.is_today);
        assert_eq!(today.status, DayStatus::Available);
    }
}
