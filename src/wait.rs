//! Bounded polling.
//!
//! [`wait_until`] is the only suspension point of the page objects: every
//! "wait for the panel", "wait for the dropdown", "wait for the dialog to
//! close" goes through it with a [`WaitOptions`] bound.
//!
//! # Example
//!
//! ```ignore
//! use product_form_driver::wait::{wait_for_visible, WaitOptions};
//!
//! let options = WaitOptions::new().with_timeout(Duration::from_secs(5));
//! wait_for_visible(&root, &By::css("#panel"), &options).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::browser::{By, Element};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default wait bound (30 seconds).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between two predicate evaluations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// WaitOptions
// ============================================================================

/// Timeout and poll interval of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Give up once this much time has elapsed.
    pub timeout: Duration,

    /// Delay between two evaluations of the predicate.
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl WaitOptions {
    /// Creates options with the default bound and interval.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the poll interval.
    #[inline]
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the interval is zero or longer than the timeout.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::config("Poll interval must be greater than zero"));
        }
        if self.interval > self.timeout {
            return Err(Error::config(format!(
                "Poll interval ({}ms) exceeds timeout ({}ms)",
                self.interval.as_millis(),
                self.timeout.as_millis()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Polling
// ============================================================================

/// Re-evaluates `predicate` until it yields `true` or the bound elapses.
///
/// The predicate runs at least once. An error from the predicate aborts the
/// wait immediately.
///
/// # Errors
///
/// [`Error::Timeout`] carrying `description` and the elapsed milliseconds.
pub async fn wait_until<P, Fut>(
    description: &str,
    options: &WaitOptions,
    mut predicate: P,
) -> Result<()>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if predicate().await? {
            trace!(condition = description, attempts, "Condition satisfied");
            return Ok(());
        }

        let elapsed = started.elapsed();
        if elapsed >= options.timeout {
            debug!(
                condition = description,
                attempts,
                elapsed_ms = elapsed.as_millis() as u64,
                "Wait timed out"
            );
            return Err(Error::timeout(description, elapsed.as_millis() as u64));
        }

        sleep(options.interval.min(options.timeout - elapsed)).await;
    }
}

/// Waits until the element matched by `by` under `scope` is visible.
pub async fn wait_for_visible(scope: &Element, by: &By, options: &WaitOptions) -> Result<()> {
    let element = &scope.find(by.clone());
    wait_until(&format!("visible({by})"), options, move || element.is_visible()).await
}

/// Waits until the element matched by `by` under `scope` is no longer visible.
pub async fn wait_for_not_visible(scope: &Element, by: &By, options: &WaitOptions) -> Result<()> {
    let element = &scope.find(by.clone());
    wait_until(&format!("not visible({by})"), options, move || async move {
        Ok(!element.is_visible().await?)
    })
    .await
}

// ============================================================================
// Tests
// ============================================================================
