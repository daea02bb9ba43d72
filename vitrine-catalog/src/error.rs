use vitrine_shared::errors::{AppError, ErrorCode};

/// Rejected filter or sort input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown value '{value}' for filter '{field}'")]
    UnknownToken { field: &'static str, value: String },

    #[error("price bound '{bound}' must be a whole number, got '{value}'")]
    InvalidPrice { bound: &'static str, value: String },

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let code = match err {
            CatalogError::UnknownSortKey(_) => ErrorCode::InvalidSortKey,
            _ => ErrorCode::InvalidFilter,
        };
        AppError::new(code, err.to_string())
    }
}
