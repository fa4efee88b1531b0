use std::time::Duration;

use tracing::{info, warn};

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::error::UiResult;
use crate::facade::page::Page;
use crate::locators::tockify;
use crate::pages::calendar::{self, CalendarSettings, CalendarView, NavigationOutcome, TargetDate};

/// Tockify homepage with its embedded demo calendar.
///
/// Everything after [`TockifyPage::switch_to_calendar_iframe`] runs inside
/// the calendar frame until [`TockifyPage::get_page_title`] leaves it.
pub struct TockifyPage<'s> {
    page: Page<'s>,
    url: String,
    title_part: String,
    calendar: CalendarSettings,
    settle: Duration,
}

impl<'s> TockifyPage<'s> {
    pub fn new(session: &'s mut BrowserSession, config: &AppConfig) -> Self {
        TockifyPage {
            page: Page::new(session, &config.timeouts),
            url: config.urls.tockify.clone(),
            title_part: config.expectations.tockify_title_part.clone(),
            calendar: config.calendar.settings(),
            settle: config.timeouts.settle(),
        }
    }

    pub fn load(&mut self) -> UiResult<()> {
        self.page.go_to_url(&self.url)?;
        self.page.wait_for_title_contains(&self.title_part, None)?;
        info!("tockify page loaded");
        Ok(())
    }

    /// Enter the calendar frame and let it finish loading.
    pub fn switch_to_calendar_iframe(&mut self) -> UiResult<()> {
        self.page.switch_to_frame(&tockify::CALENDAR_IFRAME, None)?;

        // The spinner does not show on every load.
        if let Err(e) = self.page.wait_for_invisibility(&tockify::LOADING_SPINNER, None) {
            warn!("spinner check failed, proceeding: {}", e);
        }

        self.page.pause(self.settle);
        info!("inside calendar iframe");
        Ok(())
    }

    pub fn load_and_switch_to_calendar_iframe(&mut self) -> UiResult<()> {
        self.load()?;
        self.switch_to_calendar_iframe()?;
        self.page.wait_visible(&tockify::MONTH_YEAR_NAV, None)?;
        Ok(())
    }

    pub fn select_date_from_calendar(&mut self, day: u32, month: u32, year: i32) -> UiResult<NavigationOutcome> {
        let target = TargetDate::new(day, month, year)?;
        self.select_target(target)
    }

    /// `"28 Feb 2040"`
    pub fn select_date(&mut self, date: &str) -> UiResult<NavigationOutcome> {
        let target: TargetDate = date.parse()?;
        self.select_target(target)
    }

    fn select_target(&mut self, target: TargetDate) -> UiResult<NavigationOutcome> {
        let settings = self.calendar.clone();
        let outcome = calendar::select_date(self, target, &settings)?;
        self.page.pause(self.settle);
        info!(%target, steps = outcome.steps, "date selected");
        Ok(outcome)
    }

    pub fn get_selected_date_display(&mut self) -> UiResult<String> {
        self.page.wait_visible(&tockify::DATE_DISPLAY, None)?;
        self.page.get_element_text(&tockify::DATE_DISPLAY, None)
    }

    pub fn select_monthly_tab(&mut self) -> UiResult<()> {
        self.page.click_element(&tockify::MONTHLY_TAB, None)?;
        self.page.wait_visible(&tockify::CALENDAR_GRID, None)?;
        info!("monthly view shown");
        Ok(())
    }

    pub fn is_calendar_grid_displayed(&mut self) -> UiResult<bool> {
        self.page.is_element_displayed(&tockify::CALENDAR_GRID, None)
    }

    /// Title the calendar shows for itself, e.g. "Demo Calendar".
    pub fn get_calendar_title(&mut self) -> UiResult<String> {
        self.page.wait_visible(&tockify::CALENDAR_TITLE_DISPLAY, None)?;
        self.page.get_element_text(&tockify::CALENDAR_TITLE_DISPLAY, None)
    }

    /// Title of the host page; leaves the calendar frame.
    pub fn get_page_title(&mut self) -> UiResult<String> {
        self.page.switch_to_default_content()?;
        self.page.title()
    }
}

impl CalendarView for TockifyPage<'_> {
    fn header_text(&mut self) -> UiResult<String> {
        self.page
            .wait_visible(&tockify::MONTH_YEAR_NAV, Some(self.calendar.read_backoff))?;
        self.page.get_element_text(&tockify::MONTH_YEAR_NAV, Some(self.calendar.read_backoff))
    }

    fn show_next(&mut self) -> UiResult<()> {
        self.page.click_element(&tockify::NEXT_MONTH_BUTTON, None)
    }

    fn show_previous(&mut self) -> UiResult<()> {
        self.page.click_element(&tockify::PREV_MONTH_BUTTON, None)
    }

    fn select_day(&mut self, day: u32) -> UiResult<()> {
        self.page.click_element(&tockify::day_button(day), None)
    }
}
