//! OpenAPI module

use axum::Json;
use utoipa::OpenApi;

use crate::infrastructure::http::handlers::api::*;

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Mail Relay"),
    paths(email::send::handler),
    components(schemas(email::send::SendEmailBody, email::send::AttachmentBody))
)]
pub struct ApiDocs;

/// Serve the OpenAPI document
pub async fn handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDocs::openapi())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::test_state};

    #[tokio::test]
    async fn test_openapi_handler() -> TestResult {
        let server = TestServer::new(router(
            test_state(None),
            HeaderValue::from_static("http://localhost:3000"),
        ))?;

        let response = server.get("/api/openapi.json").await;

        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();

        assert_eq!(json["info"]["title"], "Mail Relay");
        assert!(json["paths"]["/api/email/send"]["post"].is_object());

        Ok(())
    }
}
