//! Emails module: validates outbound emails and hands them to a [`Mailer`](super::mailer::Mailer).

mod errors;
mod new_email;
mod service;

pub use errors::SendEmailError;
pub use new_email::NewEmail;
pub use service::{EmailSenderService, EmailSenderServiceImpl};
