use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::driver::{Driver, ElementRef};
use crate::browser::service::DriverService;
use crate::browser::webdriver::{MAX_TIMEOUT_MS, WebDriverClient, chrome_capabilities};
use crate::cli::config::BrowserConfig;
use crate::error::UiResult;
use crate::locators::locator::Locator;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Which window and frame subsequent element operations are scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserContext {
    /// Window that was current when the session started.
    pub main_window: Option<String>,
    pub current_window: Option<String>,
    /// Frames entered from the window's top-level document, outermost first.
    pub frame_path: Vec<Locator>,
}

impl BrowserContext {
    pub fn in_frame(&self) -> bool {
        !self.frame_path.is_empty()
    }

    pub fn on_main_window(&self) -> bool {
        self.main_window == self.current_window
    }
}

/// The one browser session of a run.
///
/// Owns the driver and the explicit [`BrowserContext`]; page objects borrow
/// it mutably, so no two operations ever touch the browser at once.
pub struct BrowserSession {
    driver: Box<dyn Driver>,
    context: BrowserContext,
    service: Option<DriverService>,
    tracer: Option<TraceLogger>,
    scenario: Option<String>,
    closed: bool,
}

impl BrowserSession {
    /// Connect to (and optionally start) a WebDriver server and open a session.
    pub fn launch(config: &BrowserConfig) -> UiResult<Self> {
        let service = match &config.chromedriver_path {
            Some(path) => Some(DriverService::start(
                path,
                config.driver_port,
                config.page_load_timeout(),
            )?),
            None => None,
        };
        let url = service
            .as_ref()
            .map(|s| s.url().to_string())
            .unwrap_or_else(|| config.webdriver_url.clone());

        let capabilities = chrome_capabilities(config.headless, config.window_size);
        // HTTP timeout must outlast page loads, which block the navigate call.
        let http_timeout = config
            .page_load_timeout()
            .saturating_mul(3)
            .min(Duration::from_millis(MAX_TIMEOUT_MS));
        let mut client = WebDriverClient::connect(&url, capabilities, http_timeout)?;
        client.set_timeouts(config.page_load_timeout(), config.page_load_timeout())?;

        let mut session = Self::with_driver(Box::new(client))?;
        session.service = service;
        info!(%url, headless = config.headless, "browser session started");
        Ok(session)
    }

    /// Wrap an already-connected driver; the current window becomes the main one.
    pub fn with_driver(mut driver: Box<dyn Driver>) -> UiResult<Self> {
        let window = driver.current_window()?;
        Ok(BrowserSession {
            driver,
            context: BrowserContext {
                main_window: Some(window.clone()),
                current_window: Some(window),
                frame_path: Vec::new(),
            },
            service: None,
            tracer: None,
            scenario: None,
            closed: false,
        })
    }

    pub fn driver(&mut self) -> &mut dyn Driver {
        self.driver.as_mut()
    }

    pub fn context(&self) -> &BrowserContext {
        &self.context
    }

    pub fn set_tracer(&mut self, tracer: TraceLogger) {
        self.tracer = Some(tracer);
    }

    /// Label attached to trace events until changed.
    pub fn set_scenario(&mut self, scenario: Option<&str>) {
        self.scenario = scenario.map(str::to_string);
    }

    pub fn trace(&self, event: TraceEvent) {
        if let Some(tracer) = &self.tracer {
            tracer.log(&event.with_scenario(self.scenario.as_deref()));
        }
    }

    /// Load `url` in the current window. Navigation resets the frame scope
    /// to the top-level document.
    pub fn navigate(&mut self, url: &str) -> UiResult<()> {
        self.driver.navigate(url)?;
        self.context.frame_path.clear();
        Ok(())
    }

    /// Make `handle` current. Frames do not survive a window switch.
    pub fn enter_window(&mut self, handle: &str) -> UiResult<()> {
        self.driver.switch_to_window(handle)?;
        self.context.current_window = Some(handle.to_string());
        self.context.frame_path.clear();
        debug!(%handle, "switched window");
        Ok(())
    }

    /// Enter a frame element found by `locator` in the current context.
    pub fn enter_frame(&mut self, locator: &Locator, frame: &ElementRef) -> UiResult<()> {
        self.driver.switch_to_frame(frame)?;
        self.context.frame_path.push(locator.clone());
        debug!(%locator, depth = self.context.frame_path.len(), "entered frame");
        Ok(())
    }

    /// Return to the top-level document of the current window.
    pub fn leave_frames(&mut self) -> UiResult<()> {
        self.driver.switch_to_default_content()?;
        self.context.frame_path.clear();
        Ok(())
    }

    /// Back to the main window's top document on a blank page. Windows
    /// other than the main one are closed.
    pub fn reset(&mut self) -> UiResult<()> {
        if let Some(main) = self.context.main_window.clone() {
            for handle in self.driver.window_handles()? {
                if handle != main {
                    self.driver.switch_to_window(&handle)?;
                    self.driver.close_window()?;
                    debug!(%handle, "closed extra window");
                }
            }
            self.enter_window(&main)?;
        }
        if self.context.in_frame() {
            self.leave_frames()?;
        }
        self.navigate("about:blank")
    }

    /// Quit the browser session.
    pub fn quit(&mut self) -> UiResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Best-effort quit: the browser may already be gone
        if let Err(e) = self.driver.quit() {
            warn!("browser quit failed: {}", e);
        }
        if let Some(mut service) = self.service.take() {
            service.stop();
        }
        info!("browser session closed");
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = self.quit();
    }
}
