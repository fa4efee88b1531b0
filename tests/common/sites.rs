//! Fake versions of the four target sites, wired into a `FakeBrowser`.

#![allow(dead_code)]

use serde_json::Value;
use ui_scenarios::locators::{aubergine, dnd, tockify, upload};
use ui_scenarios::pages::calendar::MonthYear;

use crate::common::fake_driver::{FakeBrowser, FakeElement, FakeState};

/// Upload form; clicking Upload swaps in the result page.
pub fn upload_site(fake: &FakeBrowser, success_text: &str) -> String {
    fake.add(upload::CONTENT, "");
    fake.add(upload::MAIN_HEADING, "File Uploader");
    let input = fake.add(upload::FILE_INPUT, "");
    fake.add_element(upload::DROPZONE_INPUT, FakeElement::new("").hidden());
    fake.add(upload::UPLOADED_FILES_DISPLAY, "test_file.pdf");
    let button = fake.add(upload::UPLOAD_BUTTON, "Upload");

    let success = success_text.to_string();
    fake.on_click(&button, move |st| {
        st.remove(&upload::MAIN_HEADING);
        st.add(upload::SUCCESS_MESSAGE_HEADER, FakeElement::new(&success));
        st.add(upload::UPLOADED_FILES_RESULT, FakeElement::new("\n    test_file.pdf\n  "));
    });
    input
}

/// Two columns; returns the header ids (A, B). Nothing reacts to a drag yet.
pub fn dnd_site(fake: &FakeBrowser) -> (String, String) {
    fake.add(dnd::COLUMN_A, "A");
    fake.add(dnd::COLUMN_B, "B");
    let a = fake.add(dnd::HEADER_A, "A");
    let b = fake.add(dnd::HEADER_B, "B");
    (a, b)
}

pub fn swapper(a: &str, b: &str) -> impl FnMut(&mut FakeState) + 'static {
    let (a, b) = (a.to_string(), b.to_string());
    move |st| {
        let text_a = st.text_of(&a);
        let text_b = st.text_of(&b);
        st.set_text(&a, &text_b);
        st.set_text(&b, &text_a);
    }
}

pub const PYTHON_URL: &str = "https://auberginesolutions.com/python-development-company/";
pub const CONTACT_URL: &str = "https://auberginesolutions.com/contact-us/";

/// Homepage with a consent banner, hover menu, and the experts link.
pub fn aubergine_site(fake: &FakeBrowser) {
    fake.title_for("auberginesolutions.com", "Aubergine Solutions | Digital Product Development");
    fake.add(aubergine::COOKIE_ACCEPT_CANDIDATES[0].clone(), "Accept");
    fake.add(aubergine::EXPERTISE_MENU_ITEM, "Expertise");
    let python = fake.add(aubergine::PYTHON_SUBMENU_ITEM, "Python");
    fake.on_click(&python, |st| {
        st.set_location(PYTHON_URL, "Python Development Company | Aubergine Solutions");
    });
    fake.add(aubergine::FIRST_IMAGE_ON_PAGE, "");
    fake.add(aubergine::CAROUSEL_CONTAINER, "");
    fake.add(aubergine::TALK_TO_EXPERTS_BUTTON, "Talk to our python experts now");
    fake.on_script("window.open", |st, _args| {
        st.open_window(CONTACT_URL, "Contact Us | Aubergine Solutions");
        Value::Null
    });
}

/// Tockify page with the demo calendar inside its iframe, showing `start`.
/// Returns the header element id.
pub fn tockify_site(fake: &FakeBrowser, start: MonthYear) -> String {
    fake.title_for("tockify.com", "Tockify | Calendar for your website");
    let frame = fake.add(tockify::CALENDAR_IFRAME, "");
    let inside = |text: &str| FakeElement::new(text).in_frame(&frame);

    let header = fake.add_element(tockify::MONTH_YEAR_NAV, inside(&start.to_string()));
    let next = fake.add_element(tockify::NEXT_MONTH_BUTTON, inside(">"));
    let prev = fake.add_element(tockify::PREV_MONTH_BUTTON, inside("<"));
    fake.on_click(&next, step(&header, MonthYear::next));
    fake.on_click(&prev, step(&header, MonthYear::previous));

    let display = fake.add_element(tockify::DATE_DISPLAY, inside(""));
    let day = fake.add_element(tockify::day_button(28), inside("28"));
    {
        let (header, display) = (header.clone(), display.clone());
        fake.on_click(&day, move |st| {
            let shown = MonthYear::parse(&st.text_of(&header)).expect("header");
            let text = format!("28/{:02}/{:02}", shown.month, shown.year % 100);
            st.set_text(&display, &text);
        });
    }

    let tab = fake.add_element(tockify::MONTHLY_TAB, inside("Month"));
    let grid = fake.add_element(tockify::CALENDAR_GRID, inside("").hidden());
    fake.on_click(&tab, move |st| st.element_mut(&grid).displayed = true);
    fake.add_element(tockify::CALENDAR_TITLE_DISPLAY, inside("Demo Calendar"));

    header
}

fn step(header: &str, advance: fn(&MonthYear) -> MonthYear) -> impl FnMut(&mut FakeState) + 'static {
    let header = header.to_string();
    move |st| {
        let shown = MonthYear::parse(&st.text_of(&header)).expect("header");
        st.set_text(&header, &advance(&shown).to_string());
    }
}
