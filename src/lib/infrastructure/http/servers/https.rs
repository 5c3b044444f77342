//! HTTPS application server

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::Router;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{debug, info};

use crate::{
    domain::communication::emails::EmailSenderService,
    infrastructure::http::{router, shutdown_signal, state::AppState, HttpServerConfig, Server},
};

/// The application's HTTPS server
#[derive(Debug)]
pub struct HttpsServer {
    router: Router,
    address: SocketAddr,
    tls_config: RustlsConfig,
}

impl HttpsServer {
    /// Returns a new HTTPS server bound to the port specified in `config`.
    pub async fn new(
        state: AppState<impl EmailSenderService>,
        config: &HttpServerConfig,
        cert_path: &str,
        key_path: &str,
    ) -> Result<Self> {
        let tls_config = RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .context("failed to load TLS config")?;

        let router = router(state, config.allowed_origin()?);

        Ok(Self {
            router,
            address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port)),
            tls_config,
        })
    }
}

#[async_trait]
impl Server for HttpsServer {
    #[mutants::skip]
    async fn run(self) -> Result<()> {
        debug!("HTTPS Server listening on {}", self.address);

        let handle = Handle::new();

        let server = axum_server::bind_rustls(self.address, self.tls_config)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::select! {
            result = server => result.context("server error")?,
            _ = shutdown_signal(Some(handle)) => {
                info!("Shutting down HTTPS server");
            }
        }

        Ok(())
    }
}
