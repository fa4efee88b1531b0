use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::error::{UiError, UiResult};
use crate::pages::aubergine_page::AuberginePage;
use crate::pages::drag_and_drop_page::DragAndDropPage;
use crate::pages::tockify_page::TockifyPage;
use crate::pages::upload_page::UploadPage;
use crate::scenario::context::ScenarioContext;

const TOCKIFY_DAY: u32 = 28;
const TOCKIFY_MONTH: u32 = 2;
const TOCKIFY_YEAR: i32 = 2040;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    Upload,
    #[value(name = "drag_and_drop")]
    DragAndDrop,
    Aubergine,
    Tockify,
}

impl ScenarioId {
    /// All scenarios in run order.
    pub fn all() -> [ScenarioId; 4] {
        [
            ScenarioId::Upload,
            ScenarioId::DragAndDrop,
            ScenarioId::Aubergine,
            ScenarioId::Tockify,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Upload => "upload",
            ScenarioId::DragAndDrop => "drag_and_drop",
            ScenarioId::Aubergine => "aubergine",
            ScenarioId::Tockify => "tockify",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Upload => "upload a fixture file and confirm the result page",
            ScenarioId::DragAndDrop => "drag column A onto column B and confirm they swap",
            ScenarioId::Aubergine => "reach the Python page through the menu, open the contact link in a new tab",
            ScenarioId::Tockify => "pick 28 Feb 2040 in the embedded calendar, switch to the monthly view",
        }
    }

    pub fn run(&self, session: &mut BrowserSession, config: &AppConfig, ctx: &mut ScenarioContext) -> UiResult<()> {
        match self {
            ScenarioId::Upload => upload_scenario(session, config, ctx),
            ScenarioId::DragAndDrop => drag_and_drop_scenario(session, config, ctx),
            ScenarioId::Aubergine => aubergine_scenario(session, config, ctx),
            ScenarioId::Tockify => tockify_scenario(session, config, ctx),
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Scenarios
// ============================================================================

pub fn upload_scenario(session: &mut BrowserSession, config: &AppConfig, ctx: &mut ScenarioContext) -> UiResult<()> {
    let fixture = &config.fixtures.upload_file;
    if !fixture.is_file() {
        return Err(UiError::ResourceMissing { path: fixture.clone() });
    }
    let file_name = config.fixtures.upload_file_name();

    let mut page = UploadPage::new(session, config);
    page.load()?;
    page.upload_file(fixture)?;

    let displayed = page.get_displayed_file_name()?;
    ctx.check_contains("displayed file name", &displayed, &file_name)?;

    page.click_upload_button()?;
    let message = page.get_upload_success_message()?;
    ctx.check_contains("success message", &message, &config.expectations.upload_success)?;

    let uploaded = page.get_uploaded_files_result()?;
    ctx.check_contains("uploaded files", &uploaded, &file_name)?;

    info!(file = %file_name, "upload scenario done");
    Ok(())
}

pub fn drag_and_drop_scenario(
    session: &mut BrowserSession,
    config: &AppConfig,
    ctx: &mut ScenarioContext,
) -> UiResult<()> {
    let mut page = DragAndDropPage::new(session, config);
    page.load()?;

    ctx.check_equals("column A header", page.get_column_a_header_text()?.as_str(), "A")?;
    ctx.check_equals("column B header", page.get_column_b_header_text()?.as_str(), "B")?;

    page.drag_a_to_b()?;

    ctx.check_equals("column A header after drag", page.get_column_a_header_text()?.as_str(), "B")?;
    ctx.check_equals("column B header after drag", page.get_column_b_header_text()?.as_str(), "A")?;

    info!("drag and drop scenario done");
    Ok(())
}

pub fn aubergine_scenario(session: &mut BrowserSession, config: &AppConfig, ctx: &mut ScenarioContext) -> UiResult<()> {
    let mut page = AuberginePage::new(session, config);
    page.navigate_to_python_expertise()?;

    ctx.check_contains("page title", &page.title()?, "Python")?;
    ctx.check_true("first image displayed", page.is_first_image_displayed()?)?;
    ctx.check_true("carousel displayed", page.is_carousel_displayed()?)?;

    page.open_talk_to_experts_link_in_new_tab()?;
    page.switch_to_new_tab()?;
    let contact_url = page.wait_for_url("contact")?;
    ctx.check_contains("new tab URL", &contact_url, "contact")?;

    page.switch_to_main_tab()?;
    let main_url = page.current_url()?;
    ctx.check_contains("main tab URL", &main_url, "/python-development-company/")?;

    info!("aubergine scenario done");
    Ok(())
}

pub fn tockify_scenario(session: &mut BrowserSession, config: &AppConfig, ctx: &mut ScenarioContext) -> UiResult<()> {
    let mut page = TockifyPage::new(session, config);
    page.load_and_switch_to_calendar_iframe()?;

    let outcome = page.select_date_from_calendar(TOCKIFY_DAY, TOCKIFY_MONTH, TOCKIFY_YEAR)?;
    info!(start = %outcome.start, steps = outcome.steps, "calendar navigated");

    let shown = page.get_selected_date_display()?;
    ctx.check_equals("selected date", shown.as_str(), config.expectations.tockify_date.as_str())?;

    page.select_monthly_tab()?;
    ctx.check_true("calendar grid displayed", page.is_calendar_grid_displayed()?)?;

    let title = page.get_page_title()?;
    ctx.check_contains("page title", &title, &config.expectations.tockify_title_part)?;

    info!("tockify scenario done");
    Ok(())
}
