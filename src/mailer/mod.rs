//! Mail delivery for the contact form

mod client;
mod traits;

pub use client::EmailJsMailer;
pub use traits::Mailer;

#[cfg(test)]
pub use traits::MockMailer;

use thiserror::Error;

/// Why a message could not be delivered
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("failed to reach mail service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail service rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}
