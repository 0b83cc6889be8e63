//! Merge progress indicator.
//!
//! A [`Spinner`] follows a session's state channel and animates while the
//! session is merging.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::output::progress::Spinner;
//! use pdfjoin::session::SessionController;
//!
//! # async fn example(session: SessionController) -> pdfjoin::Result<()> {
//! let spinner = tokio::spawn(Spinner::new("Merging").follow(session.subscribe()));
//! let outcome = session.merge().await;
//! spinner.await.ok();
//! # Ok(())
//! # }
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::session::MergeState;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner indicator: ⠋ ⠙ ⠹ ⠸ ⠼ ⠴ ⠦ ⠧ ⠇ ⠏
pub struct Spinner {
    /// Message shown next to the spinner.
    message: String,
    /// Start time of the operation.
    start_time: Instant,
    /// Time between frames.
    interval: Duration,
    /// Whether the spinner draws anything.
    enabled: bool,
    /// Current frame.
    frame: usize,
}

impl Spinner {
    /// Create a spinner, enabled when stdout is a terminal.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start_time: Instant::now(),
            interval: Duration::from_millis(100),
            enabled: Self::is_terminal(),
            frame: 0,
        }
    }

    /// Create a disabled spinner (no output).
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new("")
        }
    }

    fn is_terminal() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal()
    }

    /// Whether the spinner draws anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render the current frame and advance.
    pub fn render(&mut self) -> String {
        let frame = FRAMES[self.frame % FRAMES.len()];
        self.frame += 1;

        let elapsed = format_duration(self.start_time.elapsed());
        if self.message.is_empty() {
            format!("{frame} {elapsed}")
        } else {
            format!("{frame} {} {elapsed}", self.message)
        }
    }

    fn tick(&mut self) {
        if self.enabled {
            let line = self.render();
            print!("\r{line}");
            io::stdout().flush().ok();
        }
    }

    fn clear(&self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    /// Animate until the session reaches `Done`, `Failed` or `Empty`, or the
    /// session is dropped.
    pub async fn follow(mut self, mut states: watch::Receiver<MergeState>) {
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            let state = *states.borrow_and_update();
            if is_settled(state) {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    if state.is_busy() {
                        self.tick();
                    }
                }
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.clear();
    }
}

fn is_settled(state: MergeState) -> bool {
    matches!(
        state,
        MergeState::Done | MergeState::Failed | MergeState::Empty
    )
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
