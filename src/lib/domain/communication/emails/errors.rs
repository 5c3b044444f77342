use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{email_addresses::EmailAddressError, mailer::MailerError};

/// Errors that can occur when sending an email
#[derive(Debug, Error)]
pub enum SendEmailError {
    /// The recipient is empty once trimmed
    #[error("Recipient email address must not be empty.")]
    EmptyRecipient,

    /// The recipient is not a plausible email address
    #[error("Recipient email address format is invalid.")]
    InvalidRecipient,

    /// The HTML body is empty or whitespace
    #[error("Email HTML content must not be empty.")]
    EmptyHtmlContent,

    /// The mailer failed; passed through untouched
    #[error(transparent)]
    Mailer(#[from] MailerError),
}

impl SendEmailError {
    /// Whether the error was caused by the caller's input
    pub fn is_validation(&self) -> bool {
        !matches!(self, SendEmailError::Mailer(_))
    }
}

impl From<EmailAddressError> for SendEmailError {
    fn from(err: EmailAddressError) -> Self {
        debug!("EmailAddressError -> SendEmailError");

        match err {
            EmailAddressError::EmptyEmailAddress => SendEmailError::EmptyRecipient,
            EmailAddressError::InvalidEmailAddress => SendEmailError::InvalidRecipient,
        }
    }
}
