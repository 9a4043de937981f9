use thiserror::Error;
use uuid::Uuid;

/// Errors from the account lookup surface
#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("account {0} not found")]
    NotFound(Uuid),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("account API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode account response: {0}")]
    Parse(String),
}

impl AccountApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccountApiError::NotFound(_))
    }
}

/// Errors from the catalog upload surface
#[derive(Debug, Error)]
pub enum CatalogApiError {
    #[error("catalog rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("no authenticated session")]
    Unauthenticated,
}

/// Errors from the security surface
#[derive(Debug, Error)]
pub enum SecurityApiError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("security API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Errors building a client from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("failed to construct HTTP client: {0}")]
    Http(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let id = Uuid::new_v4();
        assert!(AccountApiError::NotFound(id).is_not_found());
        assert!(!AccountApiError::Transport("boom".into()).is_not_found());
    }

    #[test]
    fn errors_render_their_context() {
        let err = CatalogApiError::Rejected {
            status: 409,
            message: "catalog version already exists".into(),
        };
        assert_eq!(
            err.to_string(),
            "catalog rejected (status 409): catalog version already exists"
        );

        let id: Uuid = "2f1f7d0e-9d2d-4f29-9a32-0c6a0c7b6c10".parse().unwrap();
        assert_eq!(
            AccountApiError::NotFound(id).to_string(),
            "account 2f1f7d0e-9d2d-4f29-9a32-0c6a0c7b6c10 not found"
        );
    }
}
