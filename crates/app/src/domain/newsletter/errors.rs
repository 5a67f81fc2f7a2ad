//! Newsletter errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
