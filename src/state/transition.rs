//! Step change and progress bar animation state

use super::wizard::Stage;
use std::time::{Duration, Instant};

/// Animation phase for a step change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Outgoing view sliding up and fading out
    Exit,
    /// Incoming view sliding up into place
    Enter,
    /// Animation finished
    Complete,
}

/// Slide-and-fade between two step views.
///
/// Only one view is on screen at a time: the outgoing one finishes leaving
/// before the incoming one appears.
#[derive(Debug)]
pub struct StepTransition {
    /// Stage being left, if any
    pub from: Option<Stage>,
    /// Stage being shown
    pub to: Stage,
    /// When the transition started
    pub start_time: Instant,
    /// Current animation phase
    pub phase: TransitionPhase,
    /// Vertical offset in rows, negative is up
    pub offset: f32,
    /// 0.0 (invisible) to 1.0 (fully drawn)
    pub opacity: f32,
}

impl StepTransition {
    /// Exit duration (400ms)
    const EXIT_DURATION: Duration = Duration::from_millis(400);
    /// Enter duration (500ms)
    const ENTER_DURATION: Duration = Duration::from_millis(500);
    /// Distance the views slide, in rows
    const SLIDE_ROWS: f32 = 2.0;

    pub fn new(from: Option<Stage>, to: Stage) -> Self {
        Self::starting_at(from, to, Instant::now())
    }

    pub fn starting_at(from: Option<Stage>, to: Stage, now: Instant) -> Self {
        let mut transition = Self {
            from,
            to,
            start_time: now,
            phase: TransitionPhase::Exit,
            offset: 0.0,
            opacity: 1.0,
        };
        transition.update_at(now);
        transition
    }

    fn exit_duration(&self) -> Duration {
        if self.from.is_some() {
            Self::EXIT_DURATION
        } else {
            Duration::ZERO
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Update animation state based on time elapsed until `now`
    pub fn update_at(&mut self, now: Instant) {
        if self.phase == TransitionPhase::Complete {
            return;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        let exit = self.exit_duration();

        if elapsed < exit {
            self.phase = TransitionPhase::Exit;
            let progress = elapsed.as_secs_f32() / exit.as_secs_f32();
            let eased = simple_easing::cubic_out(progress);
            self.offset = -eased * Self::SLIDE_ROWS;
            self.opacity = 1.0 - eased;
        } else if elapsed < exit + Self::ENTER_DURATION {
            self.phase = TransitionPhase::Enter;
            let progress = (elapsed - exit).as_secs_f32() / Self::ENTER_DURATION.as_secs_f32();
            let eased = simple_easing::cubic_out(progress);
            self.offset = (1.0 - eased) * Self::SLIDE_ROWS;
            self.opacity = eased;
        } else {
            self.skip();
        }
    }

    /// Jump to the end (user pressed a key)
    pub fn skip(&mut self) {
        self.phase = TransitionPhase::Complete;
        self.offset = 0.0;
        self.opacity = 1.0;
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TransitionPhase::Complete
    }

    /// Stage whose view should be drawn right now
    pub fn visible_stage(&self) -> Stage {
        match (self.phase, self.from) {
            (TransitionPhase::Exit, Some(from)) => from,
            _ => self.to,
        }
    }

    /// Rows to shift the view by, rounded toward the resting position
    pub fn row_offset(&self) -> i32 {
        self.offset.trunc() as i32
    }
}

/// Progress bar fill easing toward the wizard's current progress.
///
/// The target is never stored apart from the wizard: callers pass the
/// freshly derived ratio in on every tick.
#[derive(Debug)]
pub struct ProgressAnimation {
    from: f32,
    to: f32,
    start_time: Instant,
    current: f32,
}

impl ProgressAnimation {
    const DURATION: Duration = Duration::from_millis(800);

    /// Starts empty, like the bar on first open
    pub fn new() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            start_time: Instant::now(),
            current: 0.0,
        }
    }

    pub fn update(&mut self, target: f32) {
        self.update_at(target, Instant::now());
    }

    /// Move toward `target`, restarting the ease if the target changed
    pub fn update_at(&mut self, target: f32, now: Instant) {
        if (target - self.to).abs() > f32::EPSILON {
            self.from = self.current;
            self.to = target;
            self.start_time = now;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        let progress = (elapsed.as_secs_f32() / Self::DURATION.as_secs_f32()).min(1.0);
        let eased = simple_easing::cubic_in_out(progress);
        self.current = self.from + (self.to - self.from) * eased;
    }

    /// Snap to the target
    pub fn finish(&mut self) {
        self.from = self.to;
        self.current = self.to;
    }

    /// Reset to empty without animating
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fill ratio to draw, 0.0 to 1.0
    pub fn current(&self) -> f32 {
        self.current
    }
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::new()
    }
}
