//! Mailer errors

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The provider answered with a non-success status
    #[error("Email provider rejected the message: {status} {body}")]
    Rejected {
        /// HTTP status code returned by the provider
        status: u16,

        /// Raw response body returned by the provider
        body: String,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
