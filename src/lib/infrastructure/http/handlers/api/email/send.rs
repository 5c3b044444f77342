//! Send email handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::communication::{
        emails::{EmailSenderService, NewEmail},
        mailer::{Attachment, DEFAULT_MIME_TYPE},
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// A file attached to the email
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AttachmentBody {
    /// The file name shown to the recipient
    #[schema(example = "report.pdf")]
    file_name: String,

    /// The file content, base64 encoded
    #[serde(with = "base64_content")]
    #[schema(value_type = String, format = Byte, example = "AQID")]
    content: Vec<u8>,

    /// The MIME type of the file
    #[schema(example = "application/pdf")]
    mime_type: String,
}

impl Default for AttachmentBody {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            content: Vec::new(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }
}

impl From<AttachmentBody> for Attachment {
    fn from(body: AttachmentBody) -> Self {
        Self {
            file_name: body.file_name,
            content: body.content,
            mime_type: body.mime_type,
        }
    }
}

/// Send email request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailBody {
    /// The HTML body of the email
    #[schema(example = "<h1>Hello</h1>")]
    #[serde(default)]
    html_content: Option<String>,

    /// The recipient's email address
    #[schema(example = "email@example.com")]
    #[serde(default)]
    recipient: Option<String>,

    /// The subject of the email
    #[schema(example = "Hello from the email builder")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,

    /// Carbon-copy recipients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cc: Option<Vec<String>>,

    /// Blind carbon-copy recipients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bcc: Option<Vec<String>>,

    /// File attachments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<AttachmentBody>>,
}

/// Send an email
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Email",
    path = "/api/email/send",
    request_body = SendEmailBody,
    responses(
        (status = StatusCode::OK, description = "Email accepted by the provider"),
        (status = StatusCode::BAD_REQUEST, description = "Missing or invalid field", body = String, content_type = "text/plain", example = json!("Recipient is required.")),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "The email provider failed", body = String, content_type = "text/plain"),
    )
)]
pub async fn handler<S: EmailSenderService>(
    State(state): State<AppState<S>>,
    request: Result<Json<SendEmailBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = request?;

    let recipient = match request.recipient {
        Some(recipient) if !recipient.trim().is_empty() => recipient,
        _ => return Err(ApiError::new_400("Recipient is required.")),
    };

    let html_content = match request.html_content {
        Some(html_content) if !html_content.trim().is_empty() => html_content,
        _ => return Err(ApiError::new_400("HTML content is required.")),
    };

    let email = NewEmail {
        html_content,
        recipient,
        subject: request.subject,
        cc: request.cc,
        bcc: request.bcc,
        attachments: request
            .attachments
            .map(|attachments| attachments.into_iter().map(Attachment::from).collect()),
    };

    state.emails.send_email(email).await?;

    Ok(StatusCode::OK)
}

mod base64_content {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(content))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;

        STANDARD.decode(encoded).map_err(D::Error::custom)
    }
}
