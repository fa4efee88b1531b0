use crate::report::report_model::SuiteReport;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a suite report for the terminal.
///
/// ```text
/// === Scenarios: ui-scenarios ===
///
/// ✓ PASS  upload (3 checks, 4.2s)
/// ✗ FAIL  tockify (1 checks, 12.0s)
///     [FAIL] selected date equals "28/02/40" (actual: "27/02/40")
///
/// === Results: 1 passed, 1 failed (2 total) in 16.2s ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Scenarios: {} ===\n\n", report.suite_name));

    for result in &report.results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} checks, {:.1}s)\n",
            marker,
            result.name,
            result.checks.len(),
            result.duration_ms as f64 / 1000.0
        ));

        for check in result.failed_checks() {
            match &check.actual {
                Some(actual) => out.push_str(&format!(
                    "    [FAIL] {} (actual: {:?})\n",
                    check.description, actual
                )),
                None => out.push_str(&format!("    [FAIL] {}\n", check.description)),
            }
        }

        // A failed check also ends the scenario with an error; skip the echo
        if let Some(ref error) = result.error {
            if result.failed_checks().next().is_none() {
                out.push_str(&format!("    [ERROR] {}\n", error));
            }
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");
    out
}
