//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// MIME type used when an attachment does not declare one
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A file attached to an email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// The file name shown to the recipient
    pub file_name: String,

    /// The raw file content
    pub content: Vec<u8>,

    /// The MIME type of the file
    pub mime_type: String,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(file_name: &str, content: Vec<u8>, mime_type: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            content,
            mime_type: mime_type.to_string(),
        }
    }
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            content: Vec::new(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }
}

/// A validated email message, ready to be handed to a provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The primary recipient of the email
    pub to: EmailAddress,

    /// The subject of the email
    pub subject: Option<String>,

    /// The HTML body of the email
    pub html_body: String,

    /// Carbon-copy recipients, in order
    pub cc: Option<Vec<String>>,

    /// Blind carbon-copy recipients, in order
    pub bcc: Option<Vec<String>>,

    /// File attachments, in order
    pub attachments: Option<Vec<Attachment>>,
}
