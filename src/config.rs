use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Bearer token for admin routes. Empty means every admin request is rejected.
    pub admin_token: String,
    /// Active bookings on one day at which the calendar shows it as fully booked.
    pub day_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "venue.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_default(),
            day_capacity: env::var("DAY_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(3),
        }
    }
}
