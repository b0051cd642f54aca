pub mod booking;
pub mod calendar;
pub mod content;

pub use booking::{
    Booking, BookingRequest, BookingStatus, ConflictingBooking, NewBooking, PublicSlot, Slot,
};
pub use calendar::{CalendarDay, DayStatus};
pub use content::ContentEntry;
