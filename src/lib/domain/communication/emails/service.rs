//! Email sender service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Mailer, Message},
};

use super::{NewEmail, SendEmailError};

/// Email sender service
#[async_trait]
pub trait EmailSenderService: Clone + Send + Sync + 'static {
    /// Validates an email and sends it.
    ///
    /// # Arguments
    /// * `email` - The [`NewEmail`] submitted by the caller.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the mailer has accepted the email, or an [`Err`]
    /// containing a [`SendEmailError`] if validation failed or the mailer reported an error.
    async fn send_email(&self, email: NewEmail) -> Result<(), SendEmailError>;
}

#[cfg(test)]
mock! {
    pub EmailSenderService {}

    impl Clone for EmailSenderService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl EmailSenderService for EmailSenderService {
        async fn send_email(&self, email: NewEmail) -> Result<(), SendEmailError>;
    }
}

/// Email sender service implementation
#[derive(Debug, Clone)]
pub struct EmailSenderServiceImpl<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
}

impl<M> EmailSenderServiceImpl<M>
where
    M: Mailer,
{
    /// Create a new email sender service
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl<M> EmailSenderService for EmailSenderServiceImpl<M>
where
    M: Mailer,
{
    #[tracing::instrument(name = "Validating email", skip_all)]
    async fn send_email(&self, email: NewEmail) -> Result<(), SendEmailError> {
        let to = EmailAddress::new(&email.recipient)?;

        if email.html_content.trim().is_empty() {
            return Err(SendEmailError::EmptyHtmlContent);
        }

        debug!(recipient = %to, "email is valid, handing over to mailer");

        let message = Message {
            to,
            subject: email.subject,
            html_body: email.html_content,
            cc: email.cc,
            bcc: email.bcc,
            attachments: email.attachments,
        };

        self.mailer.send_email(&message).await?;

        Ok(())
    }
}
