use axum::http::HeaderMap;

use crate::errors::AppError;

/// Gate in front of every administrator operation: the caller must present
/// a verified administrator identity.
pub trait AdminVerifier: Send + Sync {
    fn verify(&self, headers: &HeaderMap) -> Result<(), AppError>;
}

/// Accepts `Authorization: Bearer <token>` matching a configured secret.
pub struct BearerTokenVerifier {
    token: String,
}

impl BearerTokenVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}

impl AdminVerifier for BearerTokenVerifier {
    fn verify(&self, headers: &HeaderMap) -> Result<(), AppError> {
        if !self.is_configured() {
            return Err(AppError::Unauthorized);
        }

        let presented = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or("");

        if presented != self.token {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }
}
