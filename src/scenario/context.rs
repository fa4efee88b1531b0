use std::fmt::Display;

use tracing::{debug, warn};

use crate::error::{UiError, UiResult};
use crate::scenario::scenario_model::CheckResult;

/// Collects the checks of a running scenario.
///
/// Every check is recorded; a failing one also returns
/// [`UiError::CheckFailed`] so `?` ends the scenario there.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    pub checks: Vec<CheckResult>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, description: impl Into<String>, passed: bool, actual: Option<String>) -> UiResult<()> {
        let description = description.into();
        if passed {
            debug!(check = %description, "check passed");
        } else {
            warn!(check = %description, actual = ?actual, "check failed");
        }
        self.checks.push(CheckResult {
            description: description.clone(),
            passed,
            actual: actual.clone(),
        });

        if passed {
            Ok(())
        } else {
            let description = match actual {
                Some(actual) => format!("{} (actual: {:?})", description, actual),
                None => description,
            };
            Err(UiError::CheckFailed { description })
        }
    }

    pub fn check_true(&mut self, description: impl Into<String>, value: bool) -> UiResult<()> {
        self.check(description, value, Some(value.to_string()))
    }

    pub fn check_contains(&mut self, what: &str, actual: &str, expected: &str) -> UiResult<()> {
        self.check(
            format!("{} contains {:?}", what, expected),
            actual.contains(expected),
            Some(actual.to_string()),
        )
    }

    pub fn check_equals<T: PartialEq + Display>(&mut self, what: &str, actual: T, expected: T) -> UiResult<()> {
        self.check(
            format!("{} equals \"{}\"", what, expected),
            actual == expected,
            Some(actual.to_string()),
        )
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn into_checks(self) -> Vec<CheckResult> {
        self.checks
    }
}
