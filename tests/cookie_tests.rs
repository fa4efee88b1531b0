use std::time::{Duration, Instant};

use ui_scenarios::facade::page::Page;
use ui_scenarios::locators::aubergine::COOKIE_ACCEPT_CANDIDATES;
use ui_scenarios::locators::locator::Locator;
use ui_scenarios::pages::cookie::{CookieBanner, DismissOutcome};

use crate::common::fake_driver::{FakeBrowser, FakeElement};
use crate::common::{POLL, SHORT};

mod common;

fn banner() -> CookieBanner {
    CookieBanner::uniform(&COOKIE_ACCEPT_CANDIDATES, Duration::from_millis(20))
}

#[test]
fn absent_banner_is_not_dismissed_within_bound() {
    let fake = FakeBrowser::new();
    let mut session = fake.session();
    let mut page = Page::with_timeouts(&mut session, SHORT, POLL);

    let start = Instant::now();
    let outcome = banner().dismiss(&mut page);

    assert_eq!(outcome, DismissOutcome::NotDismissed);
    assert!(!outcome.dismissed());
    // Six candidates at 20ms each, plus polling slack
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(fake.count_calls("click"), 0);
}

#[test]
fn first_present_candidate_is_clicked() {
    let fake = FakeBrowser::new();
    let close = fake.add(Locator::id("cn-accept-cookie"), "Accept");
    let later = fake.add(Locator::css("a.cky-btn.cky-btn-accept"), "Accept");
    let mut session = fake.session();
    let mut page = Page::with_timeouts(&mut session, SHORT, POLL);

    let outcome = banner().dismiss(&mut page);

    assert_eq!(outcome, DismissOutcome::Dismissed(Locator::id("cn-accept-cookie")));
    let calls = fake.calls();
    assert!(calls.contains(&format!("click {}", close)));
    assert!(!calls.contains(&format!("click {}", later)));
}

#[test]
fn hidden_candidate_is_skipped() {
    let fake = FakeBrowser::new();
    fake.add_element(Locator::id("hs-eu-confirmation-button"), FakeElement::new("Accept").hidden());
    fake.add(Locator::id("hs-eu-close-button"), "x");
    let mut session = fake.session();
    let mut page = Page::with_timeouts(&mut session, SHORT, POLL);

    let outcome = banner().dismiss(&mut page);
    assert_eq!(outcome, DismissOutcome::Dismissed(Locator::id("hs-eu-close-button")));
}

#[test]
fn intercepted_click_falls_back_to_script() {
    let fake = FakeBrowser::new();
    fake.add_element(
        Locator::id("hs-eu-confirmation-button"),
        FakeElement::new("Accept").failing_click("element click intercepted"),
    );
    let mut session = fake.session();
    let mut page = Page::with_timeouts(&mut session, SHORT, POLL);

    let outcome = banner().dismiss(&mut page);

    assert_eq!(outcome, DismissOutcome::Dismissed(Locator::id("hs-eu-confirmation-button")));
    assert_eq!(fake.scripts(), vec!["arguments[0].click();".to_string()]);
}

#[test]
fn candidates_keep_their_own_timeouts() {
    let banner = CookieBanner::new(vec![
        (Locator::id("a"), Duration::from_millis(10)),
        (Locator::id("b"), Duration::from_millis(30)),
    ]);
    let timeouts: Vec<Duration> = banner.candidates().iter().map(|(_, t)| *t).collect();
    assert_eq!(timeouts, vec![Duration::from_millis(10), Duration::from_millis(30)]);
}
