use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_name: String,
    pub street_number: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    /// `HH:MM`, zero-padded so string order matches clock order.
    pub start_time: String,
    pub end_time: String,
    pub message: Option<String>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl Booking {
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Active bookings hold their slot; cancelled ones free it.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// Inbound booking form. Every field is optional so that missing fields
/// surface as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_name: Option<String>,
    pub street_number: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub message: Option<String>,
}

/// A booking request that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_name: String,
    pub street_number: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub message: Option<String>,
}

impl NewBooking {
    pub fn slot(&self) -> Slot<'_> {
        Slot {
            event_date: self.event_date,
            start_time: &self.start_time,
            end_time: &self.end_time,
        }
    }
}

/// The date and half-open `[start_time, end_time)` window a booking occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub event_date: NaiveDate,
    pub start_time: &'a str,
    pub end_time: &'a str,
}

impl Slot<'_> {
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

/// What a rejected requester is told about each booking in the way.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConflictingBooking {
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub name: String,
}

impl From<&Booking> for ConflictingBooking {
    fn from(b: &Booking) -> Self {
        Self {
            date: b.event_date,
            time: b.time_range(),
            status: b.status,
            name: b.name.clone(),
        }
    }
}

/// Public availability row: reveals when the venue is taken, not by whom.
#[derive(Debug, Clone, Serialize)]
pub struct PublicSlot {
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
}

impl From<Booking> for PublicSlot {
    fn from(b: Booking) -> Self {
        Self {
            event_date: b.event_date,
            start_time: b.start_time,
            end_time: b.end_time,
            status: b.status,
        }
    }
}
