use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::UiResult;

/// State an element must reach before the facade acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    /// In the DOM
    Present,
    /// In the DOM and rendered
    Visible,
    /// Visible and enabled
    Clickable,
    /// Absent, or present but not rendered
    Invisible,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementState::Present => "present",
            ElementState::Visible => "visible",
            ElementState::Clickable => "clickable",
            ElementState::Invisible => "invisible",
        };
        f.write_str(name)
    }
}

/// Shortest pause between probes, so a zero interval cannot hammer the server.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Poll-until-predicate-or-timeout.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Wait {
    /// `poll_interval` is raised to [`MIN_POLL_INTERVAL`] when shorter.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Wait {
            timeout,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Run `probe` until it yields `Some`, or return `Ok(None)` once the
    /// timeout has elapsed. The probe always runs at least once.
    ///
    /// "No such element" and "stale element" errors count as not-yet;
    /// any other error ends the wait.
    pub fn until<T>(&self, mut probe: impl FnMut() -> UiResult<Option<T>>) -> UiResult<Option<T>> {
        // A timeout too large for the clock has no deadline
        let deadline = Instant::now().checked_add(self.timeout);
        loop {
            match probe() {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => {}
                Err(e) if e.is_transient_lookup() => {}
                Err(e) => return Err(e),
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(None);
                    }
                    self.poll_interval.min(deadline - now)
                }
                None => self.poll_interval,
            };
            thread::sleep(pause);
        }
    }
}
