use std::time::Instant;

use tracing::info;

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::report::render;
use crate::report::report_model::SuiteReport;
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::scenarios::ScenarioId;
use crate::trace::logger::TraceLogger;

const SUITE_NAME: &str = "ui-scenarios";

// ============================================================================
// run subcommand
// ============================================================================

/// Run the selected scenarios and return whether all passed.
pub fn cmd_run(scenarios: &[ScenarioId], config: &AppConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let mut session = BrowserSession::launch(&config.browser)?;

    if let Some(path) = config.run.trace.as_deref() {
        let tracer = TraceLogger::new(path);
        if tracer.is_enabled() {
            info!(path = %tracer.path().display(), "writing action trace");
            session.set_tracer(tracer);
        }
    }

    let start = Instant::now();
    let results = ScenarioRunner::run_all(scenarios, &mut session, config);
    let duration = start.elapsed().as_millis();
    session.quit()?;

    let report = SuiteReport::from_results(SUITE_NAME, results).with_duration(duration);
    let all_passed = report.all_passed();

    let output_content = render(&report, &config.run.format);
    match config.run.output.as_deref() {
        Some(path) => {
            std::fs::write(path, &output_content)?;
            info!(%path, format = %config.run.format, "report written");
        }
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list() {
    print!("{}", format_scenario_list());
}

/// One line per scenario: id and description, in run order.
pub fn format_scenario_list() -> String {
    ScenarioId::all()
        .iter()
        .map(|id| format!("{:<15} {}\n", id.name(), id.description()))
        .collect()
}
