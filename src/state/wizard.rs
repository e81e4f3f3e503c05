//! Three-step contact wizard
//!
//! Owns the step cursor, the field values and the in-flight flag. Views read
//! it; key handlers drive it through [`ContactWizard::begin`],
//! [`ContactWizard::update_field`], [`ContactWizard::advance`] and the
//! two halves of submission.

use super::fields::{ContactFields, FieldName, TemplateParams};
use super::validation::{email_looks_valid, message_is_present, name_is_present};
use crate::mailer::{Mailer, MailerError};
use std::fmt;
use thiserror::Error;

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Landing screen, form not shown
    #[default]
    Idle,
    /// Step 1
    Name,
    /// Step 2
    Email,
    /// Step 3
    Message,
}

impl Stage {
    /// Step cursor value (1..=3). The landing screen sits on step 1.
    pub fn step(&self) -> u8 {
        match self {
            Stage::Idle | Stage::Name => 1,
            Stage::Email => 2,
            Stage::Message => 3,
        }
    }

    /// Field edited on this stage
    pub fn field(&self) -> Option<FieldName> {
        match self {
            Stage::Idle => None,
            Stage::Name => Some(FieldName::Name),
            Stage::Email => Some(FieldName::Email),
            Stage::Message => Some(FieldName::Message),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::for_step(self.step())
    }
}

/// Progress bar fill, derived from the step cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress(u16);

impl Progress {
    pub fn for_step(step: u8) -> Self {
        match step {
            1 => Progress(0),
            2 => Progress(50),
            _ => Progress(100),
        }
    }

    pub fn percent(&self) -> u16 {
        self.0
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Why an advance or submit request had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("Please tell me your name first")]
    EmptyName,
    #[error("That email doesn't look right")]
    InvalidEmail,
    #[error("Write a message before sending")]
    EmptyMessage,
    #[error("The form hasn't been opened")]
    NotStarted,
    #[error("Already on the last step")]
    LastStep,
    #[error("Only the last step can be sent")]
    NotOnLastStep,
    #[error("Already sending")]
    SendInFlight,
}

/// Result of applying a mailer outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Message delivered, wizard back on the landing screen
    Sent,
    /// Delivery failed, wizard still on the last step
    Failed(String),
    /// Nothing was in flight, outcome ignored
    Stale,
}

/// The contact form state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactWizard {
    stage: Stage,
    fields: ContactFields,
    submitting: bool,
}

impl ContactWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn step(&self) -> u8 {
        self.stage.step()
    }

    pub fn started(&self) -> bool {
        self.stage != Stage::Idle
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn field(&self, field: FieldName) -> &str {
        self.fields.get(field)
    }

    /// Recomputed on every call
    pub fn progress(&self) -> Progress {
        self.stage.progress()
    }

    /// Open the form on step 1. Does nothing if it is already open.
    pub fn begin(&mut self) {
        if self.stage == Stage::Idle {
            self.stage = Stage::Name;
            tracing::debug!("Contact form opened");
        }
    }

    /// Store a field value. Validation waits for [`Self::advance`].
    pub fn update_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.set(field, value.into());
    }

    /// Leave the current step if its field passes its check
    pub fn advance(&mut self) -> Result<Stage, Refusal> {
        let next = match self.stage {
            Stage::Idle => return Err(Refusal::NotStarted),
            Stage::Name => {
                if !name_is_present(&self.fields.name) {
                    return Err(Refusal::EmptyName);
                }
                Stage::Email
            }
            Stage::Email => {
                if !email_looks_valid(&self.fields.email) {
                    return Err(Refusal::InvalidEmail);
                }
                Stage::Message
            }
            Stage::Message => return Err(Refusal::LastStep),
        };

        tracing::debug!("Advancing from step {} to step {}", self.step(), next.step());
        self.stage = next;
        Ok(next)
    }

    /// First half of submission: mark the send as in flight and hand out
    /// the payload. At most one send can be outstanding.
    pub fn start_submit(&mut self) -> Result<TemplateParams, Refusal> {
        if self.stage != Stage::Message {
            return Err(Refusal::NotOnLastStep);
        }
        if self.submitting {
            return Err(Refusal::SendInFlight);
        }
        if !message_is_present(&self.fields.message) {
            return Err(Refusal::EmptyMessage);
        }

        self.submitting = true;
        Ok(TemplateParams::from(&self.fields))
    }

    /// Second half of submission: apply the mailer's outcome.
    ///
    /// Success replaces the whole state in one assignment. Failure only
    /// clears the in-flight flag so the user can retry.
    pub fn finish_submit(&mut self, result: Result<(), MailerError>) -> SubmitOutcome {
        if !self.submitting {
            tracing::warn!("Ignoring mail outcome with no send in flight");
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(()) => {
                tracing::info!("Contact message delivered");
                *self = Self::default();
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::error!("Email error: {err}");
                self.submitting = false;
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }

    /// Start, await and finish a send in one call
    #[allow(dead_code)]
    pub async fn submit<M>(&mut self, mailer: &M) -> Result<SubmitOutcome, Refusal>
    where
        M: Mailer + ?Sized,
    {
        let params = self.start_submit()?;
        let result = mailer.send(&params).await;
        Ok(self.finish_submit(result))
    }
}
