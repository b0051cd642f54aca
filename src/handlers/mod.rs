pub mod admin;
pub mod bookings;
pub mod content;
pub mod health;

use axum::http::StatusCode;

/// Plain `OPTIONS` requests succeed with an empty body; real CORS
/// preflights are answered by the CORS layer before reaching this.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
