use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thirtyfour::error::WebDriverError;

use crate::browser::Locator;

/// Classification of why a scenario did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// A bounded wait's deadline elapsed before the element appeared.
    Timeout,
    /// An unwaited lookup found nothing.
    ElementNotFound,
    /// An explicit expectation check did not hold.
    AssertionFailed,
    /// Any lower-level driver or environment fault.
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "Timeout",
            Self::ElementNotFound => "ElementNotFound",
            Self::AssertionFailed => "AssertionFailed",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Every failure a scenario body can raise. The runner converts these into
/// `ScenarioResult`s; nothing propagates past it.
#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error("timed out after {timeout:?} waiting for {locator}")]
    Timeout { locator: Locator, timeout: Duration },

    #[error("element not found: {locator}")]
    ElementNotFound { locator: Locator },

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("missing carried state: {0} was never stored by an earlier scenario")]
    MissingCarriedState(&'static str),

    #[error("cart counter text {0:?} is not a number")]
    CounterParse(String),

    #[error("driver error: {0}")]
    Driver(#[from] WebDriverError),
}

impl SmokeError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::ElementNotFound { .. } => FailureKind::ElementNotFound,
            Self::Assertion(_) => FailureKind::AssertionFailed,
            Self::MissingCarriedState(_) | Self::CounterParse(_) | Self::Driver(_) => {
                FailureKind::Other
            }
        }
    }
}

pub type SmokeResult<T> = Result<T, SmokeError>;
