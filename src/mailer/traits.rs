//! Trait abstraction for mail delivery to enable mocking in tests

use super::MailerError;
use crate::state::TemplateParams;
use async_trait::async_trait;

/// Delivers a filled-in contact form somewhere a human will read it
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message. The error is opaque to callers and only logged.
    async fn send(&self, params: &TemplateParams) -> Result<(), MailerError>;
}
