use crate::report::report_model::SuiteReport;

const CLASSNAME: &str = "ui-scenarios";

// ============================================================================
// JUnit XML reporter: CI integration format
// ============================================================================

/// Generate JUnit XML for CI systems.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="ui-scenarios" tests="2" failures="1" time="16.200">
///   <testcase name="upload" classname="ui-scenarios" time="4.200" />
///   <testcase name="tockify" classname="ui-scenarios" time="12.000">
///     <failure message="check failed" type="CheckFailure">selected date equals "28/02/40"</failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &SuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.results {
        let name = escape_xml(&result.name);
        let time = format!("{:.3}", result.duration_ms as f64 / 1000.0);

        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"{}\" time=\"{}\" />\n",
                name, CLASSNAME, time
            ));
            continue;
        }

        let mut body_parts: Vec<String> = result
            .failed_checks()
            .map(|c| match &c.actual {
                Some(actual) => format!("{} (actual: {:?})", c.description, actual),
                None => c.description.clone(),
            })
            .collect();

        let (message, kind) = if body_parts.is_empty() {
            ("execution error", "ExecutionError")
        } else {
            ("check failed", "CheckFailure")
        };

        if let Some(ref error) = result.error {
            body_parts.push(format!("Error: {}", error));
        }

        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"{class}\" time=\"{time}\">\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
            name = name,
            class = CLASSNAME,
            time = time,
            message = message,
            kind = kind,
            body = escape_xml(&body_parts.join("\n")),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
