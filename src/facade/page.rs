use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::browser::driver::{Driver, ElementRef};
use crate::browser::session::BrowserSession;
use crate::cli::config::TimeoutConfig;
use crate::error::{UiError, UiResult};
use crate::facade::wait::{ElementState, Wait};
use crate::locators::locator::Locator;
use crate::trace::trace::TraceEvent;

/// Timeout-bound find/act wrapper over a [`BrowserSession`].
///
/// Every element operation waits for its precondition first and fails with
/// [`UiError::ElementNotReady`] when it is not met in time. `timeout: None`
/// means the configured default.
pub struct Page<'s> {
    session: &'s mut BrowserSession,
    default_timeout: Duration,
    poll_interval: Duration,
}

impl<'s> Page<'s> {
    pub fn new(session: &'s mut BrowserSession, timeouts: &TimeoutConfig) -> Self {
        Self::with_timeouts(session, timeouts.default_wait(), timeouts.poll_interval())
    }

    pub fn with_timeouts(
        session: &'s mut BrowserSession,
        default_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Page {
            session,
            default_timeout,
            poll_interval,
        }
    }

    pub fn session(&mut self) -> &mut BrowserSession {
        &mut *self.session
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    fn wait(&self, timeout: Option<Duration>) -> Wait {
        Wait::new(timeout.unwrap_or(self.default_timeout), self.poll_interval)
    }

    fn record<T>(&self, action: &str, target: impl ToString, result: &UiResult<T>) {
        let event = TraceEvent::now(action).with_target(target);
        let event = match result {
            Ok(_) => event,
            Err(e) => event.failed(e),
        };
        self.session.trace(event);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn go_to_url(&mut self, url: &str) -> UiResult<()> {
        let result = self.session.navigate(url);
        self.record("navigate", url, &result);
        result?;
        info!(%url, "navigated");
        Ok(())
    }

    pub fn title(&mut self) -> UiResult<String> {
        self.session.driver().title()
    }

    pub fn current_url(&mut self) -> UiResult<String> {
        self.session.driver().current_url()
    }

    pub fn wait_for_title_contains(&mut self, part: &str, timeout: Option<Duration>) -> UiResult<String> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let found = wait.until(|| {
            let title = driver.title()?;
            Ok(title.contains(part).then_some(title))
        })?;
        let result = found.ok_or_else(|| UiError::Timeout {
            condition: format!("title containing {:?}", part),
            timeout: wait.timeout,
        });
        self.record("wait title", part, &result);
        result
    }

    pub fn wait_for_url_contains(&mut self, part: &str, timeout: Option<Duration>) -> UiResult<String> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let found = wait.until(|| {
            let url = driver.current_url()?;
            Ok(url.contains(part).then_some(url))
        })?;
        let result = found.ok_or_else(|| UiError::Timeout {
            condition: format!("URL containing {:?}", part),
            timeout: wait.timeout,
        });
        self.record("wait url", part, &result);
        result
    }

    // =========================================================================
    // Element waits
    // =========================================================================

    /// Wait until the first element matching `locator` is in `state`.
    ///
    /// `ElementState::Invisible` has no element to return; use
    /// [`Page::wait_for_invisibility`] for it.
    pub fn wait_for(
        &mut self,
        locator: &Locator,
        state: ElementState,
        timeout: Option<Duration>,
    ) -> UiResult<ElementRef> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let found = wait.until(|| first_in_state(&mut *driver, locator, state))?;
        let result = found.ok_or_else(|| UiError::ElementNotReady {
            locator: locator.clone(),
            state,
            timeout: wait.timeout,
        });
        if result.is_err() {
            self.record("wait", locator, &result);
        }
        result
    }

    pub fn find_element(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<ElementRef> {
        self.wait_for(locator, ElementState::Present, timeout)
    }

    pub fn wait_visible(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<ElementRef> {
        self.wait_for(locator, ElementState::Visible, timeout)
    }

    pub fn wait_clickable(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<ElementRef> {
        self.wait_for(locator, ElementState::Clickable, timeout)
    }

    /// Wait until no element matches, or the first match is not rendered.
    pub fn wait_for_invisibility(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<()> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let gone = wait.until(|| Ok(is_invisible(&mut *driver, locator)?.then_some(())))?;
        let result = gone.ok_or_else(|| UiError::ElementNotReady {
            locator: locator.clone(),
            state: ElementState::Invisible,
            timeout: wait.timeout,
        });
        self.record("wait invisible", locator, &result);
        result?;
        debug!(%locator, "element invisible");
        Ok(())
    }

    /// Whether the element becomes visible within the timeout. A timeout is
    /// `false`, not an error.
    pub fn is_element_displayed(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<bool> {
        match self.wait_visible(locator, timeout) {
            Ok(_) => Ok(true),
            Err(UiError::ElementNotReady { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Wait until the element's text contains `expected`; returns the full text.
    pub fn wait_for_text_in_element(
        &mut self,
        locator: &Locator,
        expected: &str,
        timeout: Option<Duration>,
    ) -> UiResult<String> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let found = wait.until(|| {
            let Some(element) = driver.find_elements(locator)?.into_iter().next() else {
                return Ok(None);
            };
            let text = driver.text(&element)?;
            Ok(text.contains(expected).then_some(text))
        })?;
        let result = found.ok_or_else(|| UiError::Timeout {
            condition: format!("text {:?} in {}", expected, locator),
            timeout: wait.timeout,
        });
        self.record("wait text", locator, &result);
        result
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Wait for the element to reach `state`, then run `action` on it.
    ///
    /// The find/act pair is retried while the element is missing or goes
    /// stale between the two, so those driver errors never escape; running
    /// out of time is [`UiError::ElementNotReady`].
    fn act<T>(
        &mut self,
        locator: &Locator,
        state: ElementState,
        timeout: Option<Duration>,
        mut action: impl FnMut(&mut dyn Driver, &ElementRef) -> UiResult<T>,
    ) -> UiResult<T> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let done = wait.until(|| match first_in_state(&mut *driver, locator, state)? {
            Some(element) => action(&mut *driver, &element).map(Some),
            None => Ok(None),
        })?;
        done.ok_or_else(|| UiError::ElementNotReady {
            locator: locator.clone(),
            state,
            timeout: wait.timeout,
        })
    }

    pub fn click_element(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<()> {
        let result = self.act(locator, ElementState::Clickable, timeout, |driver, element| {
            driver.click(element)
        });
        self.record("click", locator, &result);
        result?;
        debug!(%locator, "clicked");
        Ok(())
    }

    /// Click through `HTMLElement.click()`, bypassing overlays that would
    /// intercept a native click.
    pub fn click_with_script(&mut self, element: &ElementRef) -> UiResult<()> {
        self.execute_script("arguments[0].click();", vec![element.to_json()])?;
        Ok(())
    }

    /// Clear the element, then type `text` into it.
    pub fn type_into_element(&mut self, locator: &Locator, text: &str, timeout: Option<Duration>) -> UiResult<()> {
        let result = self.act(locator, ElementState::Present, timeout, |driver, element| {
            driver.clear(element)?;
            driver.send_keys(element, text)
        });
        self.record("type", locator, &result);
        result?;
        debug!(%locator, %text, "typed");
        Ok(())
    }

    /// Type without clearing first (file inputs).
    pub fn send_keys(&mut self, locator: &Locator, text: &str, timeout: Option<Duration>) -> UiResult<()> {
        let result = self.act(locator, ElementState::Present, timeout, |driver, element| {
            driver.send_keys(element, text)
        });
        self.record("send keys", locator, &result);
        result
    }

    /// Visible text of the element, trimmed.
    pub fn get_element_text(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<String> {
        let text = self.act(locator, ElementState::Present, timeout, |driver, element| {
            driver.text(element)
        })?;
        Ok(text.trim().to_string())
    }

    pub fn execute_script(&mut self, script: &str, args: Vec<Value>) -> UiResult<Value> {
        let result = self.session.driver().execute_script(script, args);
        self.record("script", script, &result);
        result
    }

    pub fn hover(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<()> {
        let result = self.act(locator, ElementState::Visible, timeout, |driver, element| {
            driver.move_to(element)
        });
        self.record("hover", locator, &result);
        result?;
        debug!(%locator, "hovered");
        Ok(())
    }

    /// Pointer drag from `source` onto `target`; both must be present.
    pub fn drag_and_drop(&mut self, source: &Locator, target: &Locator, timeout: Option<Duration>) -> UiResult<()> {
        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let mut missing = source;
        let done = wait.until(|| {
            missing = source;
            let Some(from) = first_in_state(&mut *driver, source, ElementState::Present)? else {
                return Ok(None);
            };
            missing = target;
            let Some(to) = first_in_state(&mut *driver, target, ElementState::Present)? else {
                return Ok(None);
            };
            driver.drag_and_drop(&from, &to).map(Some)
        })?;
        let result = done.ok_or_else(|| UiError::ElementNotReady {
            locator: missing.clone(),
            state: ElementState::Present,
            timeout: wait.timeout,
        });
        self.record("drag", format!("{} -> {}", source, target), &result);
        result
    }

    /// Fixed pause for pages that animate after an action.
    pub fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    // =========================================================================
    // Context switching
    // =========================================================================

    /// Wait for the frame element, then scope subsequent calls inside it.
    pub fn switch_to_frame(&mut self, locator: &Locator, timeout: Option<Duration>) -> UiResult<()> {
        let frame = self.wait_for(locator, ElementState::Present, timeout)?;
        let result = self.session.enter_frame(locator, &frame);
        self.record("enter frame", locator, &result);
        result
    }

    pub fn switch_to_default_content(&mut self) -> UiResult<()> {
        let result = self.session.leave_frames();
        self.record("default content", "top", &result);
        result
    }

    /// Switch to the one window that is not current.
    ///
    /// Waits until at least two windows exist. More than one candidate is
    /// [`UiError::AmbiguousWindowState`].
    pub fn switch_to_new_tab(&mut self, timeout: Option<Duration>) -> UiResult<()> {
        let current = match self.session.context().current_window.clone() {
            Some(handle) => handle,
            None => self.session.driver().current_window()?,
        };

        let wait = self.wait(timeout);
        let driver = self.session.driver();
        let handles = wait
            .until(|| {
                let handles = driver.window_handles()?;
                Ok((handles.len() >= 2).then_some(handles))
            })?
            .ok_or_else(|| UiError::Timeout {
                condition: "a second window".into(),
                timeout: wait.timeout,
            })?;

        let others: Vec<&String> = handles.iter().filter(|h| **h != current).collect();
        if others.len() != 1 {
            let result: UiResult<()> = Err(UiError::AmbiguousWindowState {
                expected: 2,
                found: handles.len(),
            });
            self.record("new tab", "window", &result);
            return result;
        }

        let target = others[0].clone();
        let result = self.session.enter_window(&target);
        self.record("new tab", &target, &result);
        result?;
        info!(handle = %target, "switched to new tab");
        Ok(())
    }

    /// Switch back to the window the session started on.
    pub fn switch_to_main_tab(&mut self) -> UiResult<()> {
        let main = match self.session.context().main_window.clone() {
            Some(handle) => handle,
            None => self.session.driver().current_window()?,
        };
        let result = self.session.enter_window(&main);
        self.record("main tab", &main, &result);
        result?;
        info!("switched back to main tab");
        Ok(())
    }
}

/// First element matching `locator` if it is in `state`.
fn first_in_state(
    driver: &mut dyn Driver,
    locator: &Locator,
    state: ElementState,
) -> UiResult<Option<ElementRef>> {
    let Some(element) = driver.find_elements(locator)?.into_iter().next() else {
        return Ok(None);
    };
    let ready = match state {
        ElementState::Present => true,
        ElementState::Visible => driver.is_displayed(&element)?,
        ElementState::Clickable => driver.is_displayed(&element)? && driver.is_enabled(&element)?,
        ElementState::Invisible => !driver.is_displayed(&element)?,
    };
    Ok(ready.then_some(element))
}

fn is_invisible(driver: &mut dyn Driver, locator: &Locator) -> UiResult<bool> {
    let Some(element) = driver.find_elements(locator)?.into_iter().next() else {
        return Ok(true);
    };
    match driver.is_displayed(&element) {
        Ok(displayed) => Ok(!displayed),
        // Detached between lookup and check: gone counts as invisible
        Err(e) if e.is_transient_lookup() => Ok(true),
        Err(e) => Err(e),
    }
}
