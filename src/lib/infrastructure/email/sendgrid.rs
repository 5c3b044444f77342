//! SendGrid email provider implementation

use std::fmt;

use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::communication::mailer::{Attachment, Mailer, MailerError, Message};

/// SendGrid configuration
#[derive(Clone, Parser)]
pub struct SendGridConfig {
    /// The SendGrid API key
    #[clap(long = "sendgrid-api-key", env = "SENDGRID_API_KEY")]
    pub api_key: String,

    /// The verified sender email address
    #[clap(
        long = "sendgrid-from-email",
        env = "SENDGRID_FROM_EMAIL",
        default_value = "noreply@example.com"
    )]
    pub from_email: String,

    /// The sender display name
    #[clap(
        long = "sendgrid-from-name",
        env = "SENDGRID_FROM_NAME",
        default_value = "Email Builder"
    )]
    pub from_name: String,

    /// The SendGrid API base URL
    #[clap(
        long = "sendgrid-base-url",
        env = "SENDGRID_BASE_URL",
        default_value = "https://api.sendgrid.com"
    )]
    pub base_url: String,
}

impl fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &"[REDACTED]")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// SendGrid mailer
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    config: SendGridConfig,
    http_client: Client,
}

impl SendGridMailer {
    /// Create a new SendGrid mailer
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v3/mail/send", self.config.base_url.trim_end_matches('/'))
    }

    fn payload<'a>(&'a self, message: &'a Message) -> SendGridMessage<'a> {
        let addresses = |emails: &'a Option<Vec<String>>| {
            emails
                .iter()
                .flatten()
                .map(|email| Address::new(email))
                .collect::<Vec<_>>()
        };

        SendGridMessage {
            personalizations: vec![Personalization {
                to: vec![Address::new(message.to.as_str())],
                cc: addresses(&message.cc),
                bcc: addresses(&message.bcc),
            }],
            from: Address {
                email: &self.config.from_email,
                name: Some(&self.config.from_name),
            },
            subject: message.subject.as_deref().unwrap_or_default(),
            content: vec![Content {
                kind: "text/html",
                value: &message.html_body,
            }],
            attachments: message
                .attachments
                .iter()
                .flatten()
                .map(AttachmentPayload::from)
                .collect(),
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    #[tracing::instrument(name = "Sending email via SendGrid", skip_all, fields(recipient = %message.to))]
    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .context("failed to reach SendGrid")?;

        let status = response.status();

        if !status.is_success() {
            let body = readable_body(response.text().await);

            warn!(%status, %body, "SendGrid rejected the message");

            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(%status, "SendGrid accepted the message");

        Ok(())
    }
}

fn readable_body<E: fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|err| {
        warn!("failed to read SendGrid response body: {err}");

        format!("<unreadable body: {err}>")
    })
}

#[derive(Debug, Serialize)]
struct SendGridMessage<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<Address<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> Address<'a> {
    fn new(email: &'a str) -> Self {
        Self { email, name: None }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct AttachmentPayload<'a> {
    content: String,
    filename: &'a str,
    #[serde(rename = "type")]
    mime_type: &'a str,
    disposition: &'a str,
}

impl<'a> From<&'a Attachment> for AttachmentPayload<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            content: STANDARD.encode(&attachment.content),
            filename: &attachment.file_name,
            mime_type: &attachment.mime_type,
            disposition: "attachment",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::{json, Value};
    use testresult::TestResult;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::domain::communication::email_addresses::EmailAddress;

    use super::*;

    fn config(base_url: &str) -> SendGridConfig {
        SendGridConfig {
            api_key: "SG.test-key".to_string(),
            from_email: "noreply@example.com".to_string(),
            from_name: "Email Builder".to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn message() -> TestResult<Message> {
        Ok(Message {
            to: EmailAddress::new("test@example.com")?,
            subject: None,
            html_body: "<h1>Hello</h1>".to_string(),
            cc: None,
            bcc: None,
            attachments: None,
        })
    }

    #[tokio::test]
    async fn test_send_email_minimal_message() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer SG.test-key"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = SendGridMailer::new(config(&server.uri()));

        mailer.send_email(&message()?).await?;

        let requests = server.received_requests().await.unwrap_or_default();
        let body: Value = serde_json::from_slice(&requests[0].body)?;

        assert_eq!(
            body,
            json!({
                "personalizations": [{ "to": [{ "email": "test@example.com" }] }],
                "from": { "email": "noreply@example.com", "name": "Email Builder" },
                "subject": "",
                "content": [{ "type": "text/html", "value": "<h1>Hello</h1>" }],
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_email_full_message() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = SendGridMailer::new(config(&format!("{}/", server.uri())));

        let message = Message {
            subject: Some("Test Subject".to_string()),
            cc: Some(vec![
                "cc1@example.com".to_string(),
                "cc2@example.com".to_string(),
            ]),
            bcc: Some(vec!["bcc1@example.com".to_string()]),
            attachments: Some(vec![
                Attachment::new("file.txt", vec![1, 2, 3], "text/plain"),
                Attachment {
                    file_name: "blob.bin".to_string(),
                    content: b"hi".to_vec(),
                    ..Default::default()
                },
            ]),
            ..message()?
        };

        mailer.send_email(&message).await?;

        let requests = server.received_requests().await.unwrap_or_default();
        let body: Value = serde_json::from_slice(&requests[0].body)?;

        assert_eq!(
            body["personalizations"],
            json!([{
                "to": [{ "email": "test@example.com" }],
                "cc": [{ "email": "cc1@example.com" }, { "email": "cc2@example.com" }],
                "bcc": [{ "email": "bcc1@example.com" }],
            }])
        );
        assert_eq!(body["subject"], "Test Subject");
        assert_eq!(
            body["attachments"],
            json!([
                {
                    "content": "AQID",
                    "filename": "file.txt",
                    "type": "text/plain",
                    "disposition": "attachment",
                },
                {
                    "content": "aGk=",
                    "filename": "blob.bin",
                    "type": "application/octet-stream",
                    "disposition": "attachment",
                },
            ])
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_email_rejected() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"errors":[{"message":"bad key"}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mailer = SendGridMailer::new(config(&server.uri()));

        let result = mailer.send_email(&message()?).await;

        match result {
            Err(MailerError::Rejected { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"errors":[{"message":"bad key"}]}"#);
            }
            other => panic!("expected a rejection, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_send_email_unreachable_provider() -> TestResult {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        drop(listener);

        let mailer = SendGridMailer::new(config(&format!("http://127.0.0.1:{port}")));

        let result = mailer.send_email(&message()?).await;

        match result {
            Err(err @ MailerError::UnknownError(_)) => {
                assert_eq!(err.to_string(), "failed to reach SendGrid");
            }
            other => panic!("expected a transport failure, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn test_readable_body_keeps_read_errors() {
        assert_eq!(
            readable_body::<String>(Ok("bad key".to_string())),
            "bad key"
        );
        assert_eq!(
            readable_body(Err("connection closed")),
            "<unreadable body: connection closed>"
        );
    }

    #[test]
    fn test_config_debug_hides_api_key() {
        let output = format!("{:?}", config("https://api.sendgrid.com"));

        assert!(!output.contains("SG.test-key"));
        assert!(output.contains("[REDACTED]"));
    }
}
