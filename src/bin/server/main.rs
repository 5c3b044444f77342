#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! REST API for the application

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use mail_relay::{
    domain::communication::emails::EmailSenderServiceImpl,
    infrastructure::{
        email::sendgrid::{SendGridConfig, SendGridMailer},
        http::{
            servers::{http::HttpServer, https::HttpsServer},
            state::AppState,
            HttpServerConfig, Server,
        },
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SendGrid configuration
    #[clap(flatten)]
    pub sendgrid: SendGridConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mail_relay=debug,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mailer = SendGridMailer::new(args.sendgrid);
    let state = AppState::new(EmailSenderServiceImpl::new(Arc::new(mailer)));

    match (&args.server.cert_path, &args.server.key_path) {
        (Some(cert_path), Some(key_path)) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| anyhow!("failed to install the rustls crypto provider"))?;

            info!(port = args.server.port, "serving over HTTPS");

            HttpsServer::new(state, &args.server, cert_path, key_path)
                .await?
                .run()
                .await
        }
        _ => {
            info!(port = args.server.port, "serving over HTTP");

            HttpServer::new(state, &args.server)?.run().await
        }
    }
}
