use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::facade::wait::ElementState;
use crate::locators::locator::Locator;

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, Error)]
pub enum UiError {
    /// Element never reached the required state within the timeout
    #[error("element {locator} not {state} after {timeout:?}")]
    ElementNotReady {
        locator: Locator,
        state: ElementState,
        timeout: Duration,
    },

    /// Window count did not match what a tab switch requires
    #[error("ambiguous window state: expected {expected} windows, found {found}")]
    AmbiguousWindowState { expected: usize, found: usize },

    /// Calendar header stayed unparsable through every read attempt
    #[error("could not parse calendar header {text:?} after {attempts} attempts")]
    DateParseFailure { text: String, attempts: u32 },

    /// Required local file is absent
    #[error("required resource missing: {}", .path.display())]
    ResourceMissing { path: PathBuf },

    /// Calendar stepping hit its ceiling without reaching the target month
    #[error("calendar navigation stalled at {displayed} (target {target}) after {steps} steps")]
    NavigationStalled {
        displayed: String,
        target: String,
        steps: u32,
    },

    #[error("invalid target date: {0}")]
    InvalidTargetDate(String),

    /// A page-level condition (title, URL, window count) was not met in time
    #[error("timed out after {timeout:?} waiting for {condition}")]
    Timeout { condition: String, timeout: Duration },

    /// A scenario check did not hold
    #[error("check failed: {description}")]
    CheckFailed { description: String },

    /// WebDriver server answered with an error object
    #[error("webdriver {command} failed ({error}): {message}")]
    WebDriver {
        command: String,
        error: String,
        message: String,
    },

    #[error("webdriver response for {command} was malformed: {detail}")]
    Protocol { command: String, detail: String },

    #[error("could not start driver service: {0}")]
    ServiceStart(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UiError {
    /// W3C error code, when the failure came from the WebDriver server.
    pub fn webdriver_code(&self) -> Option<&str> {
        match self {
            UiError::WebDriver { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }

    /// Errors that mean "the element is not there (any more)" and are
    /// retried inside a wait instead of surfacing.
    pub fn is_transient_lookup(&self) -> bool {
        matches!(
            self.webdriver_code(),
            Some("no such element") | Some("stale element reference")
        )
    }
}
