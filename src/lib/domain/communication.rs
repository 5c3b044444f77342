//! Outbound email communication

pub mod email_addresses;
pub mod emails;
pub mod mailer;
