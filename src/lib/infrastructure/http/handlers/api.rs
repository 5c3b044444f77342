use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    domain::communication::emails::EmailSenderService,
    infrastructure::http::{open_api, state::AppState},
};

pub mod email;

pub fn router<S: EmailSenderService>() -> Router<AppState<S>> {
    Router::new()
        .route("/openapi.json", get(open_api::handler))
        .route("/email/send", post(email::send::handler))
}
