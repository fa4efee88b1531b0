use std::time::Instant;

use tracing::{error, info, warn};

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::scenario::context::ScenarioContext;
use crate::scenario::scenario_model::ScenarioResult;
use crate::scenario::scenarios::ScenarioId;
use crate::trace::trace::TraceEvent;

/// Runs scenarios one after another on a single session.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run `ids` in order. An empty selection runs every scenario.
    pub fn run_all(ids: &[ScenarioId], session: &mut BrowserSession, config: &AppConfig) -> Vec<ScenarioResult> {
        let selected: Vec<ScenarioId> = if ids.is_empty() {
            ScenarioId::all().to_vec()
        } else {
            ids.to_vec()
        };

        selected
            .iter()
            .map(|id| Self::run(*id, session, config))
            .collect()
    }

    /// Run one scenario from a clean browser state.
    ///
    /// A reset failure fails the scenario without running it.
    pub fn run(id: ScenarioId, session: &mut BrowserSession, config: &AppConfig) -> ScenarioResult {
        let start = Instant::now();
        let mut ctx = ScenarioContext::new();

        session.set_scenario(Some(id.name()));
        session.trace(TraceEvent::now("scenario start").with_target(id));
        info!(scenario = %id, "running scenario");

        let outcome = match session.reset() {
            Ok(()) => id.run(session, config, &mut ctx),
            Err(e) => {
                warn!(scenario = %id, "browser reset failed: {}", e);
                Err(e)
            }
        };

        let error = match outcome {
            Ok(()) => None,
            Err(e) => {
                error!(scenario = %id, "scenario failed: {}", e);
                Some(e.to_string())
            }
        };

        let passed = error.is_none() && ctx.all_passed();
        let duration_ms = start.elapsed().as_millis();

        let end = TraceEvent::now("scenario end").with_target(id);
        session.trace(match &error {
            Some(e) => end.failed(e),
            None => end,
        });
        session.set_scenario(None);
        info!(scenario = %id, passed, duration_ms, "scenario finished");

        ScenarioResult {
            name: id.name().to_string(),
            passed,
            checks: ctx.into_checks(),
            error,
            duration_ms,
        }
    }
}
