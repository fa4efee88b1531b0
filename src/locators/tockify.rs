use crate::locators::locator::{By, Locator};

pub const CALENDAR_IFRAME: Locator = Locator::name("tkf-client-window-embed-1");

/// Stays in the DOM with `ng-hide` once loading finishes.
pub const LOADING_SPINNER: Locator = Locator::css(".spinner.spinner__double-circles");

/// Header showing the displayed month, e.g. "February 2040".
pub const MONTH_YEAR_NAV: Locator = Locator::css(".tic-nav-month-year");

pub const NEXT_MONTH_BUTTON: Locator = Locator::css(".tic-nav-next");

pub const PREV_MONTH_BUTTON: Locator = Locator::css(".tic-nav-prev");

pub const DATE_DISPLAY: Locator = Locator::css(".tic-date-display");

pub const MONTHLY_TAB: Locator = Locator::css("button[data-view='month']");

pub const CALENDAR_GRID: Locator = Locator::css(".tic-grid-view");

pub const CALENDAR_TITLE_DISPLAY: Locator = Locator::css(".tic-calendar-title");

/// Class the month grid puts on leading and trailing cells of the
/// neighbouring months.
pub const OTHER_MONTH_CLASS: &str = "tic-day-other-month";

/// Day cell for `day` (1-31) in the displayed month. Cells spilling over
/// from the previous or next month never match.
pub fn day_button(day: u32) -> Locator {
    Locator::new(
        By::XPath,
        format!(
            "//div[contains(concat(' ', normalize-space(@class), ' '), ' tic-day ') \
             and not(contains(concat(' ', normalize-space(@class), ' '), ' {} ')) \
             and normalize-space(text())='{}']",
            OTHER_MONTH_CLASS, day
        ),
    )
}
