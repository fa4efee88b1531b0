use std::time::Duration;

use tracing::info;

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::error::{UiError, UiResult};
use crate::facade::page::Page;
use crate::locators::aubergine;
use crate::pages::cookie::{CookieBanner, DismissOutcome};

const HOME_TITLE: &str = "Aubergine Solutions";
const PYTHON_PATH: &str = "/python-development-company";

pub struct AuberginePage<'s> {
    page: Page<'s>,
    url: String,
    cookie_banner: CookieBanner,
    settle: Duration,
}

impl<'s> AuberginePage<'s> {
    pub fn new(session: &'s mut BrowserSession, config: &AppConfig) -> Self {
        AuberginePage {
            page: Page::new(session, &config.timeouts),
            url: config.urls.aubergine.clone(),
            cookie_banner: CookieBanner::uniform(
                &aubergine::COOKIE_ACCEPT_CANDIDATES,
                config.timeouts.cookie_wait(),
            ),
            settle: config.timeouts.settle(),
        }
    }

    /// Load the homepage, clear the consent banner if any, and wait for the
    /// main navigation to be usable.
    pub fn load(&mut self) -> UiResult<DismissOutcome> {
        self.page.go_to_url(&self.url)?;

        let outcome = self.cookie_banner.dismiss(&mut self.page);
        if outcome.dismissed() {
            self.page.pause(self.settle);
        }

        self.page.wait_for_title_contains(HOME_TITLE, None)?;
        self.page.wait_clickable(&aubergine::EXPERTISE_MENU_ITEM, None)?;
        info!("aubergine homepage loaded");
        Ok(outcome)
    }

    /// Expertise > Python, through the hover menu.
    pub fn navigate_to_python_expertise(&mut self) -> UiResult<()> {
        self.load()?;

        self.page.hover(&aubergine::EXPERTISE_MENU_ITEM, None)?;
        self.page.wait_visible(&aubergine::PYTHON_SUBMENU_ITEM, None)?;
        self.page.click_element(&aubergine::PYTHON_SUBMENU_ITEM, None)?;

        self.page.wait_for_url_contains(PYTHON_PATH, None)?;
        self.page.wait_for_title_contains("Python", None)?;
        info!("on python expertise page");
        Ok(())
    }

    pub fn title(&mut self) -> UiResult<String> {
        self.page.title()
    }

    pub fn current_url(&mut self) -> UiResult<String> {
        self.page.current_url()
    }

    /// URL once it contains `part`; the URL as it stands if it never does.
    pub fn wait_for_url(&mut self, part: &str) -> UiResult<String> {
        match self.page.wait_for_url_contains(part, None) {
            Ok(url) => Ok(url),
            Err(UiError::Timeout { .. }) => self.page.current_url(),
            Err(e) => Err(e),
        }
    }

    pub fn is_first_image_displayed(&mut self) -> UiResult<bool> {
        self.page.is_element_displayed(&aubergine::FIRST_IMAGE_ON_PAGE, None)
    }

    pub fn is_carousel_displayed(&mut self) -> UiResult<bool> {
        self.page.is_element_displayed(&aubergine::CAROUSEL_CONTAINER, None)
    }

    /// Open the experts link's target in a new tab; focus stays put.
    pub fn open_talk_to_experts_link_in_new_tab(&mut self) -> UiResult<()> {
        let button = self.page.find_element(&aubergine::TALK_TO_EXPERTS_BUTTON, None)?;
        self.page.execute_script(
            "window.open(arguments[0].href, '_blank');",
            vec![button.to_json()],
        )?;
        info!("opened experts link in a new tab");
        Ok(())
    }

    pub fn switch_to_new_tab(&mut self) -> UiResult<()> {
        self.page.switch_to_new_tab(None)
    }

    pub fn switch_to_main_tab(&mut self) -> UiResult<()> {
        self.page.switch_to_main_tab()
    }
}
