//! Mailer port: hands a validated [`Message`] to an email provider

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{Attachment, Message, DEFAULT_MIME_TYPE};

/// Sends messages through an email provider
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The validated [`Message`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the provider has accepted the message, or an [`Err`]
    /// containing a [`MailerError`] if the provider rejected it or could not be reached.
    async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
    }
}
