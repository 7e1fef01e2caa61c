//! Bounded fixed-delay retry
//!
//! Transient failures (rate limiting, server errors) are retried a bounded
//! number of times with a fixed pause; any other failure is returned at once.

use std::fmt;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::core::ports::{
    Credentials, SpreadsheetAccess, SpreadsheetError, SpreadsheetHandle, WorksheetHandle,
};

/// Default number of attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default pause between attempts
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// Errors that can tell whether retrying may help
pub trait Transient {
    /// Whether the same call may succeed later
    fn is_transient(&self) -> bool;
}

impl Transient for SpreadsheetError {
    fn is_transient(&self) -> bool {
        Self::is_transient(self)
    }
}

/// Outcome of a retried operation that did not succeed
#[derive(Debug, Error)]
pub enum RetryError<E: fmt::Display> {
    /// Every attempt failed with a transient error
    #[error("{operation} failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Operation name
        operation: String,
        /// Attempts made
        attempts: u32,
        /// Error of the last attempt
        last: E,
    },

    /// A non-transient error stopped the retries
    #[error("{0}")]
    Fatal(E),
}

/// How many times to try and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one
    pub max_attempts: u32,
    /// Pause after each transient failure
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Policy with explicit bounds
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Run `call` until it succeeds, fails for good, or attempts run out
    pub fn run<T, E, F>(&self, operation: &str, mut call: F) -> Result<T, RetryError<E>>
    where
        E: Transient + fmt::Display,
        F: FnMut() -> Result<T, E>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match call() {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => {
                    log::warn!("{operation} failed: {err}");
                    return Err(RetryError::Fatal(err));
                }
                Err(err) if attempt >= max_attempts => {
                    log::error!("{operation} failed after {attempt} attempts: {err}");
                    return Err(RetryError::Exhausted {
                        operation: operation.to_string(),
                        attempts: attempt,
                        last: err,
                    });
                }
                Err(err) => {
                    log::warn!(
                        "{operation} attempt {attempt}/{max_attempts} failed: {err}, retrying in {:?}",
                        self.delay
                    );
                    thread::sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// Spreadsheet access whose fetch operations are retried
#[derive(Debug)]
pub struct RetryingSpreadsheet<A> {
    inner: A,
    policy: RetryPolicy,
}

impl<A: SpreadsheetAccess> RetryingSpreadsheet<A> {
    /// Wrap an access capability
    #[must_use]
    pub const fn new(inner: A, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped capability
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    fn retried<T>(
        &self,
        operation: &str,
        call: impl FnMut() -> Result<T, SpreadsheetError>,
    ) -> Result<T, SpreadsheetError> {
        self.policy.run(operation, call).map_err(|err| match err {
            RetryError::Fatal(err) => err,
            RetryError::Exhausted {
                operation,
                attempts,
                last,
            } => SpreadsheetError::RetriesExhausted {
                operation,
                attempts,
                last: Box::new(last),
            },
        })
    }
}

impl<A: SpreadsheetAccess> SpreadsheetAccess for RetryingSpreadsheet<A> {
    fn set_credentials(&self, credentials: Credentials) {
        self.inner.set_credentials(credentials);
    }

    fn has_credentials(&self) -> bool {
        self.inner.has_credentials()
    }

    fn open_spreadsheet(&self, id: &str) -> Result<SpreadsheetHandle, SpreadsheetError> {
        self.retried("open spreadsheet", || self.inner.open_spreadsheet(id))
    }

    fn open_worksheet(
        &self,
        spreadsheet: &SpreadsheetHandle,
        index: usize,
    ) -> Result<WorksheetHandle, SpreadsheetError> {
        self.retried("open worksheet", || self.inner.open_worksheet(spreadsheet, index))
    }

    fn get_all_values(&self, worksheet: &WorksheetHandle) -> Result<Vec<Vec<String>>, SpreadsheetError> {
        self.retried("get all values", || self.inner.get_all_values(worksheet))
    }
}
