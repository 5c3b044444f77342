//! Application state module

use std::{fmt, sync::Arc};

use crate::domain::communication::emails::EmailSenderService;

/// Global application state
#[derive(Clone)]
pub struct AppState<S: EmailSenderService> {
    /// Email sender service
    pub emails: Arc<S>,
}

impl<S> AppState<S>
where
    S: EmailSenderService,
{
    /// Create a new application state
    pub fn new(emails: S) -> Self {
        Self {
            emails: Arc::new(emails),
        }
    }
}

impl<S> fmt::Debug for AppState<S>
where
    S: EmailSenderService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("emails", &"EmailSenderService")
            .finish()
    }
}

#[cfg(test)]
use crate::domain::communication::emails::tests::MockEmailSenderService;

/// Application state backed by a mock email sender service
#[cfg(test)]
pub fn test_state(
    emails: Option<MockEmailSenderService>,
) -> AppState<MockEmailSenderService> {
    AppState::new(emails.unwrap_or_else(MockEmailSenderService::new))
}
