//! Application state and core logic

use crate::mailer::{Mailer, MailerError};
use crate::state::{
    ContactWizard, FieldName, ProgressAnimation, Refusal, Stage, StepTransition, SubmitOutcome,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Kind of status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Hint,
    Error,
    Success,
}

/// One-line feedback shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn hint(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Hint,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }
}

type Delivery = Result<(), MailerError>;

/// Main application struct
pub struct App {
    /// The contact form state machine
    pub wizard: ContactWizard,
    /// Step change animation, if one is running
    pub transition: Option<StepTransition>,
    /// Progress bar fill animation
    pub progress: ProgressAnimation,
    /// Whether Tab moved focus onto the Send button
    pub send_focused: bool,
    /// Feedback for the last action
    pub status_message: Option<StatusMessage>,
    /// Where deliveries are sent from
    mailer: Arc<dyn Mailer>,
    /// Outcomes of spawned sends come back here
    delivery_tx: mpsc::UnboundedSender<Delivery>,
    delivery_rx: mpsc::UnboundedReceiver<Delivery>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        Self {
            wizard: ContactWizard::new(),
            transition: None,
            progress: ProgressAnimation::new(),
            send_focused: false,
            status_message: None,
            mailer,
            delivery_tx,
            delivery_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether an animation is running (drives the faster redraw rate)
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
            || (self.wizard.started()
                && (self.progress.current() - self.wizard.progress().ratio() as f32).abs() > 1e-3)
    }

    /// Stage whose view should be on screen
    pub fn visible_stage(&self) -> Stage {
        self.transition
            .as_ref()
            .map(StepTransition::visible_stage)
            .unwrap_or_else(|| self.wizard.stage())
    }

    /// Advance animations and apply finished deliveries
    pub fn tick(&mut self) {
        self.poll_deliveries();

        if let Some(ref mut transition) = self.transition {
            transition.update();
            if transition.is_complete() {
                self.transition = None;
            }
        }

        if self.wizard.started() {
            self.progress.update(self.wizard.progress().ratio() as f32);
        }
    }

    /// Apply every delivery outcome that has arrived
    pub fn poll_deliveries(&mut self) {
        while let Ok(result) = self.delivery_rx.try_recv() {
            self.apply_delivery(result);
        }
    }

    fn apply_delivery(&mut self, result: Delivery) {
        match self.wizard.finish_submit(result) {
            SubmitOutcome::Sent => {
                self.transition = None;
                self.progress.reset();
                self.send_focused = false;
                self.status_message = Some(StatusMessage::success("Message sent. Thanks!"));
            }
            SubmitOutcome::Failed(reason) => {
                tracing::debug!("Keeping form open after failed send: {reason}");
                self.status_message = Some(StatusMessage::error(
                    "Couldn't send your message. Please try again.",
                ));
            }
            SubmitOutcome::Stale => {}
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Any key finishes a running animation
        if self.transition.take().is_some() {
            self.progress.finish();
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.wizard.stage() {
            Stage::Idle => self.handle_landing_key(key),
            Stage::Name | Stage::Email => self.handle_step_key(key),
            Stage::Message => self.handle_message_key(key),
        }
    }

    /// Ctrl+C. Quits unless a send is outstanding, which is waited for.
    pub fn handle_interrupt(&mut self) {
        if self.wizard.submitting() {
            self.status_message = Some(StatusMessage::hint(
                "Still sending your message, quit once it's done",
            ));
            return;
        }
        self.quit = true;
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.wizard.begin();
                self.transition = Some(StepTransition::new(None, self.wizard.stage()));
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_step_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.advance(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if is_text_input(&key) => self.input_char(c),
            _ => {}
        }
    }

    fn handle_message_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::SEND_MODIFIER) =>
            {
                self.send()
            }
            KeyCode::Tab | KeyCode::BackTab => self.send_focused = !self.send_focused,
            KeyCode::Enter if self.send_focused => self.send(),
            KeyCode::Enter if !self.send_focused => self.input_char('\n'),
            KeyCode::Backspace if !self.send_focused => self.backspace(),
            KeyCode::Char(c) if !self.send_focused && is_text_input(&key) => self.input_char(c),
            _ => {}
        }
    }

    fn active_field(&self) -> Option<FieldName> {
        if self.wizard.submitting() {
            return None;
        }
        self.wizard.stage().field()
    }

    fn input_char(&mut self, c: char) {
        if let Some(field) = self.active_field() {
            let mut value = self.wizard.field(field).to_string();
            value.push(c);
            self.wizard.update_field(field, value);
        }
    }

    fn backspace(&mut self) {
        if let Some(field) = self.active_field() {
            let mut value = self.wizard.field(field).to_string();
            value.pop();
            self.wizard.update_field(field, value);
        }
    }

    fn advance(&mut self) {
        let from = self.wizard.stage();
        match self.wizard.advance() {
            Ok(to) => self.transition = Some(StepTransition::new(Some(from), to)),
            Err(refusal) => self.status_message = Some(StatusMessage::hint(refusal.to_string())),
        }
    }

    /// Hand the form to the mailer on a background task
    fn send(&mut self) {
        let params = match self.wizard.start_submit() {
            Ok(params) => params,
            Err(Refusal::SendInFlight) => return,
            Err(refusal) => {
                self.status_message = Some(StatusMessage::hint(refusal.to_string()));
                return;
            }
        };

        tracing::info!("Sending contact message from {}", params.user_email);
        let mailer = Arc::clone(&self.mailer);
        let tx = self.delivery_tx.clone();
        tokio::spawn(async move {
            let result = mailer.send(&params).await;
            if tx.send(result).is_err() {
                tracing::warn!("App closed before the mail outcome arrived");
            }
        });
    }
}

/// Ctrl on its own marks a shortcut. Ctrl+Alt is how AltGr characters
/// such as `@` arrive on Windows, so those are text.
fn is_text_input(key: &KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
}
