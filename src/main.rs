//! Contact TUI - multi-step contact form for the terminal
//!
//! Collects a name, an email address and a message over three steps and
//! delivers them through EmailJS.

mod app;
mod config;
mod mailer;
mod platform;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::ContactConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mailer::EmailJsMailer;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Redraw interval while something is animating (~60fps)
const ANIMATION_POLL: Duration = Duration::from_millis(16);
/// Redraw interval otherwise
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Log to a file under the data dir so output never lands on the alternate screen
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "contact_tui=info".into());

    let log_file = ContactConfig::data_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        File::create(dir.join("contact-tui.log")).ok()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    // Fail before touching the terminal if the mailer can't be built
    let config = ContactConfig::load()?;
    let settings = config.mail_settings().with_context(|| {
        let path = ContactConfig::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "config.json".to_string());
        format!("mail service is not configured ({path})")
    })?;
    let mailer = EmailJsMailer::new(settings).context("failed to build HTTP client")?;
    tracing::info!("Starting contact form");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(Arc::new(mailer));
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting with error: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply finished sends and step animations
        app.tick();

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        let poll_duration = if app.is_animating() || app.wizard.submitting() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };

        // Handle crossterm events
        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global quit: Ctrl+C, held off while a send is outstanding
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.handle_interrupt();
                } else {
                    app.handle_key(key);
                }
            }
        }

        // Let the spawned send make progress between frames
        tokio::task::yield_now().await;

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
