use crate::report::report_model::SuiteReport;

// ============================================================================
// HTML reporter: self-contained page, inline CSS
// ============================================================================

/// Generate a self-contained HTML report: a green or red header, one section
/// per scenario listing its checks, failures in red.
pub fn generate_html_report(report: &SuiteReport) -> String {
    let header_color = if report.all_passed() { "#4CAF50" } else { "#f44336" };
    let status_text = if report.all_passed() {
        "ALL SCENARIOS PASSED"
    } else {
        "SOME SCENARIOS FAILED"
    };

    let duration_text = report
        .duration_ms
        .map(|ms| format!(" in {:.1}s", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut sections = String::new();
    for result in &report.results {
        let case_class = if result.passed { "pass" } else { "fail" };
        let case_marker = if result.passed { "\u{2713}" } else { "\u{2717}" };

        sections.push_str(&format!(
            r#"<div class="scenario {class}">
<h3>{marker} {name}</h3>
<p>Checks: {checks} | Duration: {secs:.1}s</p>
"#,
            class = case_class,
            marker = case_marker,
            name = escape_html(&result.name),
            checks = result.checks.len(),
            secs = result.duration_ms as f64 / 1000.0,
        ));

        if !result.checks.is_empty() {
            sections.push_str("<ul class=\"checks\">\n");
            for check in &result.checks {
                let class = if check.passed { "ok" } else { "bad" };
                let actual = check
                    .actual
                    .as_deref()
                    .map(|a| format!(" <span class=\"actual\">(actual: {})</span>", escape_html(a)))
                    .unwrap_or_default();
                sections.push_str(&format!(
                    "<li class=\"{}\">{}{}</li>\n",
                    class,
                    escape_html(&check.description),
                    actual
                ));
            }
            sections.push_str("</ul>\n");
        }

        if let Some(ref error) = result.error {
            sections.push_str(&format!(
                "<p class=\"error\">Error: {}</p>\n",
                escape_html(error)
            ));
        }

        sections.push_str("</div>\n");
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{suite_name} - Scenario Report</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 0; font-size: 16px; opacity: 0.9; }}
.content {{ max-width: 900px; margin: 20px auto; padding: 0 20px; }}
.scenario {{ background: white; border-radius: 6px; padding: 16px 20px; margin-bottom: 12px; border-left: 4px solid #ccc; }}
.scenario.pass {{ border-left-color: #4CAF50; }}
.scenario.fail {{ border-left-color: #f44336; }}
.scenario h3 {{ margin: 0 0 8px 0; font-size: 16px; }}
.scenario p {{ margin: 4px 0; color: #666; font-size: 14px; }}
.scenario .error {{ color: #f44336; font-weight: bold; }}
.checks {{ margin: 8px 0 0 0; padding-left: 20px; }}
.checks li {{ font-size: 13px; margin-bottom: 4px; }}
.checks li.ok {{ color: #2e7d32; }}
.checks li.bad {{ color: #c62828; }}
.actual {{ color: #666; }}
</style>
</head>
<body>
<div class="header">
<h1>{status_text}</h1>
<p>{suite_name}: {passed} passed, {failed} failed ({total} total){duration}</p>
</div>
<div class="content">
{sections}
</div>
</body>
</html>"##,
        suite_name = escape_html(&report.suite_name),
        header_color = header_color,
        status_text = status_text,
        passed = report.passed,
        failed = report.failed,
        total = report.total,
        duration = duration_text,
        sections = sections,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
