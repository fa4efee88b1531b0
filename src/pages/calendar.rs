use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{UiError, UiResult};

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Self {
        MonthYear { year, month }
    }

    /// Parse a header such as `"February 2040"` (abbreviations accepted).
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let date = NaiveDate::parse_from_str(&format!("1 {}", normalized), "%d %B %Y").ok()?;
        Some(MonthYear::new(date.year(), date.month()))
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Signed month distance from `self` to `other`.
    pub fn months_until(&self, other: &MonthYear) -> i64 {
        other.index() - self.index()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            MonthYear::new(self.year + 1, 1)
        } else {
            MonthYear::new(self.year, self.month + 1)
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            MonthYear::new(self.year - 1, 12)
        } else {
            MonthYear::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => write!(f, "{}", date.format("%B %Y")),
            None => write!(f, "{:02}/{}", self.month, self.year),
        }
    }
}

/// Day to pick. The day is not checked against the month's length: a
/// missing day cell surfaces when it is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl TargetDate {
    pub fn new(day: u32, month: u32, year: i32) -> UiResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(UiError::InvalidTargetDate(format!("month {} out of range", month)));
        }
        if !(1..=31).contains(&day) {
            return Err(UiError::InvalidTargetDate(format!("day {} out of range", day)));
        }
        Ok(TargetDate { day, month, year })
    }

    pub fn month_year(&self) -> MonthYear {
        MonthYear::new(self.year, self.month)
    }
}

impl FromStr for TargetDate {
    type Err = UiError;

    /// `"28 Feb 2040"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), "%d %b %Y")
            .map_err(|e| UiError::InvalidTargetDate(format!("{:?}: {}", s, e)))?;
        TargetDate::new(date.day(), date.month(), date.year())
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarSettings {
    /// Header reads per navigation step before giving up.
    pub read_attempts: u32,
    pub read_backoff: Duration,
    /// Ceiling on next/previous clicks for one selection.
    pub max_steps: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            read_attempts: 10,
            read_backoff: Duration::from_millis(500),
            max_steps: 600,
        }
    }
}

/// What the navigation routine needs from a month-view calendar widget.
pub trait CalendarView {
    /// Raw text of the month/year header.
    fn header_text(&mut self) -> UiResult<String>;
    fn show_next(&mut self) -> UiResult<()>;
    fn show_previous(&mut self) -> UiResult<()>;
    /// Click the cell for `day` in the displayed month.
    fn select_day(&mut self, day: u32) -> UiResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub start: MonthYear,
    pub reached: MonthYear,
    pub steps: u32,
}

enum HeaderRead {
    Read(MonthYear),
    /// Parsed fine but still shows the month from before the click.
    Unchanged(MonthYear),
}

/// Step the calendar to the target month, then pick the day.
///
/// The header is re-read after every click; nothing read before a click is
/// trusted after it.
pub fn select_date<V: CalendarView + ?Sized>(
    view: &mut V,
    target: TargetDate,
    settings: &CalendarSettings,
) -> UiResult<NavigationOutcome> {
    let goal = target.month_year();
    let start = match read_header(view, settings, None)? {
        HeaderRead::Read(m) | HeaderRead::Unchanged(m) => m,
    };

    let mut displayed = start;
    let mut steps = 0u32;

    while displayed < goal {
        check_budget(displayed, goal, steps, settings)?;
        view.show_next()?;
        steps += 1;
        displayed = after_step(view, settings, displayed, goal, steps)?;
        debug!(%displayed, %goal, steps, "calendar moved forward");
    }

    while displayed > goal {
        check_budget(displayed, goal, steps, settings)?;
        view.show_previous()?;
        steps += 1;
        displayed = after_step(view, settings, displayed, goal, steps)?;
        debug!(%displayed, %goal, steps, "calendar moved back");
    }

    view.select_day(target.day)?;

    Ok(NavigationOutcome {
        start,
        reached: displayed,
        steps,
    })
}

fn check_budget(displayed: MonthYear, goal: MonthYear, steps: u32, settings: &CalendarSettings) -> UiResult<()> {
    if steps >= settings.max_steps {
        return Err(UiError::NavigationStalled {
            displayed: displayed.to_string(),
            target: goal.to_string(),
            steps,
        });
    }
    Ok(())
}

fn after_step<V: CalendarView + ?Sized>(
    view: &mut V,
    settings: &CalendarSettings,
    before: MonthYear,
    goal: MonthYear,
    steps: u32,
) -> UiResult<MonthYear> {
    match read_header(view, settings, Some(before))? {
        HeaderRead::Read(m) => Ok(m),
        HeaderRead::Unchanged(m) => Err(UiError::NavigationStalled {
            displayed: m.to_string(),
            target: goal.to_string(),
            steps,
        }),
    }
}

/// Read and parse the header, retrying while it is unreadable, unparsable,
/// or (when `before` is given) still showing `before`.
fn read_header<V: CalendarView + ?Sized>(
    view: &mut V,
    settings: &CalendarSettings,
    before: Option<MonthYear>,
) -> UiResult<HeaderRead> {
    let attempts = settings.read_attempts.max(1);
    let mut last_text = String::new();
    let mut unchanged = None;

    for attempt in 1..=attempts {
        match view.header_text() {
            Ok(text) => {
                match MonthYear::parse(&text) {
                    Some(parsed) if Some(parsed) != before => return Ok(HeaderRead::Read(parsed)),
                    Some(parsed) => unchanged = Some(parsed),
                    None => debug!(attempt, %text, "calendar header not parsable yet"),
                }
                last_text = text;
            }
            Err(e) => debug!(attempt, "calendar header not readable yet: {}", e),
        }
        if attempt < attempts {
            thread::sleep(settings.read_backoff);
        }
    }

    match unchanged {
        Some(m) => Ok(HeaderRead::Unchanged(m)),
        None => Err(UiError::DateParseFailure {
            text: last_text,
            attempts,
        }),
    }
}
