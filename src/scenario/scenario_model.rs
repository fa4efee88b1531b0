use serde::{Deserialize, Serialize};

/// One checked expectation inside a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// What was checked, e.g. `page title contains "Python"`
    pub description: String,

    pub passed: bool,

    /// Value observed (for debugging failed checks)
    pub actual: Option<String>,
}

/// Result of running one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario id, e.g. `tockify`
    pub name: String,

    /// No error and every check passed
    pub passed: bool,

    /// Checks in the order they ran; a failing check is always the last one
    pub checks: Vec<CheckResult>,

    /// Error that stopped the scenario, if any
    pub error: Option<String>,

    pub duration_ms: u128,
}

impl ScenarioResult {
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }
}
