use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One facade action, as written to the JSONL trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    pub scenario: Option<String>,

    pub action: String,
    pub target: Option<String>,

    pub outcome: String,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(action: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            scenario: None,
            action: action.to_string(),
            target: None,
            outcome: "ok".to_string(),
            detail: None,
        }
    }

    pub fn with_scenario(mut self, scenario: Option<&str>) -> Self {
        self.scenario = scenario.map(str::to_string);
        self
    }

    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn failed(mut self, detail: impl ToString) -> Self {
        self.outcome = "error".to_string();
        self.detail = Some(detail.to_string());
        self
    }
}
