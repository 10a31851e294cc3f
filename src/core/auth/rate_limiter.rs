//! Rate limiting for login attempts
//!
//! Bounds how many login attempts a single client may make inside a time
//! window, protecting stored credentials from online guessing.
//!
//! # Overview
//!
//! Uses a fixed-window counter per client key:
//! - Each client gets a window with a start time and an attempt count
//! - Every attempt increments the count, successful or not
//! - Once the count reaches the maximum, further attempts are rejected
//! - The window (and count) resets after it elapses
//!
//! Counters live in a [`DashMap`] so concurrent requests from the same
//! client update the same window atomically through the entry API.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Default maximum attempts per window
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default window length (15 minutes)
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Attempt counter for one client
#[derive(Debug, Clone, Copy)]
struct AttemptWindow {
    started: Instant,
    count: u32,
}

/// Fixed-window login rate limiter keyed by client identity
///
/// # Example
/// ```
/// use tradepost::core::auth::rate_limiter::LoginRateLimiter;
/// use std::time::Duration;
///
/// let limiter = LoginRateLimiter::new(5, Duration::from_secs(15 * 60));
///
/// // First five attempts pass
/// for _ in 0..5 {
///     assert!(limiter.check_and_count("10.0.0.1"));
/// }
///
/// // The sixth is rejected
/// assert!(!limiter.check_and_count("10.0.0.1"));
/// ```
#[derive(Debug)]
pub struct LoginRateLimiter {
    /// Maximum attempts allowed inside one window
    max_attempts: u32,
    /// Window length
    window: Duration,
    /// Per-client attempt windows
    windows: DashMap<String, AttemptWindow>,
}

impl LoginRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `max_attempts` - Attempts allowed per window
    /// * `window` - Window length
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            windows: DashMap::new(),
        }
    }

    /// Record an attempt for `client_key` and report whether it is allowed.
    ///
    /// Returns `true` if the attempt is within the limit (attempt counted),
    /// `false` if the client has exhausted its window (attempt rejected).
    pub fn check_and_count(&self, client_key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(client_key.to_string())
            .or_insert(AttemptWindow {
                started: now,
                count: 0,
            });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_attempts {
            return false;
        }

        entry.count += 1;
        true
    }

    /// Attempts left for `client_key` in its current window
    pub fn remaining(&self, client_key: &str) -> u32 {
        match self.windows.get(client_key) {
            Some(w) if w.started.elapsed() < self.window => {
                self.max_attempts.saturating_sub(w.count)
            }
            _ => self.max_attempts,
        }
    }

    /// Forget the window for `client_key`
    pub fn reset(&self, client_key: &str) {
        self.windows.remove(client_key);
    }

    /// Get the maximum attempts per window
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Get the window length
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_WINDOW)
    }
}
