use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::auth::AdminVerifier;
use crate::config::AppConfig;
use crate::errors::AppError;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub admin: Box<dyn AdminVerifier>,
}

impl AppState {
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Store(anyhow::anyhow!("database connection lock poisoned")))
    }
}
