//! Unvalidated email, as received from a caller

use crate::domain::communication::mailer::Attachment;

/// An email as submitted by a caller, before any validation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewEmail {
    /// The HTML body
    pub html_content: String,

    /// The recipient address, possibly padded with whitespace
    pub recipient: String,

    /// The subject
    pub subject: Option<String>,

    /// Carbon-copy recipients
    pub cc: Option<Vec<String>>,

    /// Blind carbon-copy recipients
    pub bcc: Option<Vec<String>>,

    /// File attachments
    pub attachments: Option<Vec<Attachment>>,
}

impl NewEmail {
    /// Create a new email with only the required fields set
    pub fn new(html_content: &str, recipient: &str) -> Self {
        Self {
            html_content: html_content.to_string(),
            recipient: recipient.to_string(),
            ..Default::default()
        }
    }
}
