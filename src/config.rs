use std::time::Duration;

/// Default timeout for waits and readiness polling
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default interval between condition probes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Default gap between keystrokes on the key-by-key input path
pub const DEFAULT_KEYSTROKE_DELAY: Duration = Duration::from_millis(200);
/// Default duration the highlight border stays on screen
pub const DEFAULT_HIGHLIGHT_PAUSE: Duration = Duration::from_millis(500);

/// Explicit configuration passed through construction.
///
/// One value per worker; the worker that brings up the driver owns the
/// session id and every page/proxy built from it reads the same settings.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Process-wide default wait timeout, overridable per call
    pub wait_timeout: Duration,
    /// Interval between wait-condition probes
    pub poll_interval: Duration,
    /// Gap between keystrokes for key-by-key input
    pub keystroke_delay: Duration,
    /// How long `highlight` keeps the marker border visible
    pub highlight_pause: Duration,
    /// Cloud session identifier for reporting, if the bring-up recorded one
    pub session_id: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            keystroke_delay: DEFAULT_KEYSTROKE_DELAY,
            highlight_pause: DEFAULT_HIGHLIGHT_PAUSE,
            session_id: None,
        }
    }
}

impl CoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_keystroke_delay(mut self, delay: Duration) -> Self {
        self.keystroke_delay = delay;
        self
    }

    pub fn with_highlight_pause(mut self, pause: Duration) -> Self {
        self.highlight_pause = pause;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
