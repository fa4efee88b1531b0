pub mod console;
pub mod html;
pub mod junit;
pub mod report_model;

use crate::report::report_model::SuiteReport;

/// Render `report` in `format` (`console`, `html`, `junit`); anything else
/// falls back to console.
pub fn render(report: &SuiteReport, format: &str) -> String {
    match format {
        "html" => html::generate_html_report(report),
        "junit" => junit::generate_junit_xml(report),
        _ => console::format_console_report(report),
    }
}
