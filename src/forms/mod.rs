//! Form definitions backing the list page routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod characters;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("invalid page")]
    InvalidPage,
}
