use std::time::Duration;

use tracing::{info, warn};

use crate::facade::page::Page;
use crate::locators::locator::Locator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DismissOutcome {
    /// The candidate that was clicked
    Dismissed(Locator),
    NotDismissed,
}

impl DismissOutcome {
    pub fn dismissed(&self) -> bool {
        matches!(self, DismissOutcome::Dismissed(_))
    }
}

/// Best-effort removal of a consent overlay.
///
/// Candidates are tried in order, each with its own short timeout. Nothing
/// here is fatal: the banner may legitimately be absent.
#[derive(Debug, Clone)]
pub struct CookieBanner {
    candidates: Vec<(Locator, Duration)>,
}

impl CookieBanner {
    pub fn new(candidates: Vec<(Locator, Duration)>) -> Self {
        CookieBanner { candidates }
    }

    /// Same timeout for every locator.
    pub fn uniform(locators: &[Locator], timeout: Duration) -> Self {
        Self::new(locators.iter().map(|l| (l.clone(), timeout)).collect())
    }

    pub fn candidates(&self) -> &[(Locator, Duration)] {
        &self.candidates
    }

    pub fn dismiss(&self, page: &mut Page<'_>) -> DismissOutcome {
        for (locator, timeout) in &self.candidates {
            let button = match page.wait_clickable(locator, Some(*timeout)) {
                Ok(button) => button,
                Err(_) => continue,
            };

            let native = page.session().driver().click(&button);
            let clicked = match native {
                Ok(()) => true,
                Err(e) => {
                    warn!(%locator, "cookie button click failed, retrying by script: {}", e);
                    match page.click_with_script(&button) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!(%locator, "script click failed: {}", e);
                            false
                        }
                    }
                }
            };

            if clicked {
                info!(%locator, "cookie consent dismissed");
                return DismissOutcome::Dismissed(locator.clone());
            }
        }

        info!("no cookie consent popup found");
        DismissOutcome::NotDismissed
    }
}
