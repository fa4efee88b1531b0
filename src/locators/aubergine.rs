use crate::locators::locator::Locator;

/// Top-level "Expertise" entry; hovering it opens the submenu.
pub const EXPERTISE_MENU_ITEM: Locator =
    Locator::css("li.menu-item-has-children > a[href*='/expertise']");

pub const PYTHON_SUBMENU_ITEM: Locator =
    Locator::css("li.menu-item-has-children a[href*='/python-development-company']");

pub const FIRST_IMAGE_ON_PAGE: Locator = Locator::css(".entry-content img:first-of-type");

pub const CAROUSEL_CONTAINER: Locator =
    Locator::css(".owl-carousel.wp-block-aubergine-owl-carousel");

/// "Talk to our python experts now"
pub const TALK_TO_EXPERTS_BUTTON: Locator =
    Locator::css("a.wp-block-button__link[href*='contact']");

/// Consent banner buttons, most specific first.
pub const COOKIE_ACCEPT_CANDIDATES: [Locator; 6] = [
    Locator::id("hs-eu-confirmation-button"),
    Locator::id("hs-eu-close-button"),
    Locator::id("cn-accept-cookie"),
    Locator::css(".cli_action_button.wt-cli-accept-btn"),
    Locator::css("a.cky-btn.cky-btn-accept"),
    Locator::xpath("//button[contains(., 'Accept') or contains(., 'Got it')]"),
];
