//! In-memory `Driver` for offline tests.
//!
//! A `FakeBrowser` owns the shared page state; the `FakeDriver` handed to the
//! session reads and mutates it. Elements are registered per locator and may
//! live inside a frame (named by the frame element's id). Click, drag and
//! script hooks let tests script page reactions.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use ui_scenarios::browser::driver::{Driver, ElementRef};
use ui_scenarios::browser::session::BrowserSession;
use ui_scenarios::error::{UiError, UiResult};
use ui_scenarios::locators::locator::Locator;

pub type Hook = Box<dyn FnMut(&mut FakeState)>;
pub type ScriptHook = Box<dyn FnMut(&mut FakeState, &[Value]) -> Value>;

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub text: String,
    pub displayed: bool,
    pub enabled: bool,
    /// Frame element id this element lives in; `None` is the top document.
    pub frame: Option<String>,
    /// Lookups that still miss before the element shows up.
    pub hidden_lookups: u32,
    /// WebDriver error code returned by `click`.
    pub click_error: Option<String>,
    /// Clicks left that fail with `click_error`; `None` fails every click.
    pub click_failures: Option<u32>,
    /// `is_displayed` fails with a stale reference.
    pub stale: bool,
    pub keys: Vec<String>,
}

impl FakeElement {
    pub fn new(text: &str) -> Self {
        FakeElement {
            text: text.to_string(),
            displayed: true,
            enabled: true,
            frame: None,
            hidden_lookups: 0,
            click_error: None,
            click_failures: None,
            stale: false,
            keys: Vec::new(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn in_frame(mut self, frame_id: &str) -> Self {
        self.frame = Some(frame_id.to_string());
        self
    }

    pub fn appears_after(mut self, lookups: u32) -> Self {
        self.hidden_lookups = lookups;
        self
    }

    pub fn failing_click(mut self, error: &str) -> Self {
        self.click_error = Some(error.to_string());
        self
    }

    /// Only the first `times` clicks fail.
    pub fn failing_clicks(mut self, error: &str, times: u32) -> Self {
        self.click_error = Some(error.to_string());
        self.click_failures = Some(times);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub handle: String,
    pub url: String,
    pub title: String,
}

pub struct FakeState {
    pub windows: Vec<FakeWindow>,
    /// `None` after the current window was closed.
    pub current: Option<String>,
    pub frame: Option<String>,
    pub elements: HashMap<String, FakeElement>,
    pub by_locator: HashMap<Locator, Vec<String>>,
    /// Title set on navigation to a URL containing the key.
    pub titles: Vec<(String, String)>,
    pub click_hooks: HashMap<String, Hook>,
    pub drag_hook: Option<Hook>,
    pub script_hooks: Vec<(String, ScriptHook)>,
    pub calls: Vec<String>,
    pub scripts: Vec<String>,
    pub quit: bool,
    next_id: u32,
}

impl FakeState {
    fn new() -> Self {
        FakeState {
            windows: vec![FakeWindow {
                handle: "main".into(),
                url: "about:blank".into(),
                title: String::new(),
            }],
            current: Some("main".into()),
            frame: None,
            elements: HashMap::new(),
            by_locator: HashMap::new(),
            titles: Vec::new(),
            click_hooks: HashMap::new(),
            drag_hook: None,
            script_hooks: Vec::new(),
            calls: Vec::new(),
            scripts: Vec::new(),
            quit: false,
            next_id: 0,
        }
    }

    pub fn add(&mut self, locator: Locator, element: FakeElement) -> String {
        self.next_id += 1;
        let id = format!("el-{}", self.next_id);
        self.elements.insert(id.clone(), element);
        self.by_locator.entry(locator).or_default().push(id.clone());
        id
    }

    pub fn remove(&mut self, locator: &Locator) {
        if let Some(ids) = self.by_locator.remove(locator) {
            for id in ids {
                self.elements.remove(&id);
            }
        }
    }

    pub fn element_mut(&mut self, id: &str) -> &mut FakeElement {
        self.elements.get_mut(id).expect("unknown fake element")
    }

    pub fn text_of(&self, id: &str) -> String {
        self.elements[id].text.clone()
    }

    pub fn set_text(&mut self, id: &str, text: &str) {
        self.element_mut(id).text = text.to_string();
    }

    fn window_mut(&mut self) -> UiResult<&mut FakeWindow> {
        let current = self.current.clone();
        self.windows
            .iter_mut()
            .find(|w| Some(&w.handle) == current.as_ref())
            .ok_or_else(|| wire_error("window", "no such window"))
    }

    /// Change the current window's URL without a navigation call (link clicks).
    pub fn set_location(&mut self, url: &str, title: &str) {
        if let Ok(window) = self.window_mut() {
            window.url = url.to_string();
            window.title = title.to_string();
        }
    }

    pub fn open_window(&mut self, url: &str, title: &str) -> String {
        let handle = format!("win-{}", self.windows.len() + 1);
        self.windows.push(FakeWindow {
            handle: handle.clone(),
            url: url.to_string(),
            title: title.to_string(),
        });
        handle
    }

    fn element(&self, element: &ElementRef) -> UiResult<&FakeElement> {
        self.elements
            .get(&element.0)
            .ok_or_else(|| wire_error("element", "stale element reference"))
    }
}

fn wire_error(command: &str, error: &str) -> UiError {
    UiError::WebDriver {
        command: command.to_string(),
        error: error.to_string(),
        message: format!("fake: {}", error),
    }
}

// ============================================================================
// Test-side handle
// ============================================================================

#[derive(Clone)]
pub struct FakeBrowser {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        FakeBrowser {
            state: Rc::new(RefCell::new(FakeState::new())),
        }
    }

    pub fn driver(&self) -> FakeDriver {
        FakeDriver {
            state: Rc::clone(&self.state),
        }
    }

    pub fn session(&self) -> BrowserSession {
        BrowserSession::with_driver(Box::new(self.driver())).expect("fake session")
    }

    pub fn add(&self, locator: Locator, text: &str) -> String {
        self.add_element(locator, FakeElement::new(text))
    }

    pub fn add_element(&self, locator: Locator, element: FakeElement) -> String {
        self.state.borrow_mut().add(locator, element)
    }

    pub fn update(&self, id: &str, f: impl FnOnce(&mut FakeElement)) {
        f(self.state.borrow_mut().element_mut(id));
    }

    pub fn text(&self, id: &str) -> String {
        self.state.borrow().text_of(id)
    }

    pub fn keys_sent(&self, id: &str) -> Vec<String> {
        self.state.borrow().elements[id].keys.clone()
    }

    pub fn title_for(&self, url_part: &str, title: &str) {
        self.state
            .borrow_mut()
            .titles
            .push((url_part.to_string(), title.to_string()));
    }

    pub fn on_click(&self, id: &str, hook: impl FnMut(&mut FakeState) + 'static) {
        self.state
            .borrow_mut()
            .click_hooks
            .insert(id.to_string(), Box::new(hook));
    }

    pub fn on_drag(&self, hook: impl FnMut(&mut FakeState) + 'static) {
        self.state.borrow_mut().drag_hook = Some(Box::new(hook));
    }

    pub fn on_script(&self, pattern: &str, hook: impl FnMut(&mut FakeState, &[Value]) -> Value + 'static) {
        self.state
            .borrow_mut()
            .script_hooks
            .push((pattern.to_string(), Box::new(hook)));
    }

    pub fn open_window(&self, url: &str, title: &str) -> String {
        self.state.borrow_mut().open_window(url, title)
    }

    pub fn current_handle(&self) -> Option<String> {
        self.state.borrow().current.clone()
    }

    pub fn current_frame(&self) -> Option<String> {
        self.state.borrow().frame.clone()
    }

    pub fn current_url(&self) -> String {
        let state = self.state.borrow();
        state
            .windows
            .iter()
            .find(|w| Some(&w.handle) == state.current.as_ref())
            .map(|w| w.url.clone())
            .unwrap_or_default()
    }

    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.state.borrow().scripts.clone()
    }

    pub fn was_quit(&self) -> bool {
        self.state.borrow().quit
    }
}

// ============================================================================
// Driver implementation
// ============================================================================

pub struct FakeDriver {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDriver {
    fn log(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Driver for FakeDriver {
    fn navigate(&mut self, url: &str) -> UiResult<()> {
        self.log(format!("navigate {}", url));
        let mut state = self.state.borrow_mut();
        let title = state
            .titles
            .iter()
            .find(|(part, _)| url.contains(part.as_str()))
            .map(|(_, title)| title.clone())
            .unwrap_or_default();
        state.frame = None;
        let window = state.window_mut()?;
        window.url = url.to_string();
        window.title = title;
        Ok(())
    }

    fn title(&mut self) -> UiResult<String> {
        Ok(self.state.borrow_mut().window_mut()?.title.clone())
    }

    fn current_url(&mut self) -> UiResult<String> {
        Ok(self.state.borrow_mut().window_mut()?.url.clone())
    }

    fn find_elements(&mut self, locator: &Locator) -> UiResult<Vec<ElementRef>> {
        let mut state = self.state.borrow_mut();
        let frame = state.frame.clone();
        let ids = state.by_locator.get(locator).cloned().unwrap_or_default();

        let mut found = Vec::new();
        for id in ids {
            let element = state.element_mut(&id);
            if element.frame != frame {
                continue;
            }
            if element.hidden_lookups > 0 {
                element.hidden_lookups -= 1;
                continue;
            }
            found.push(ElementRef(id));
        }
        Ok(found)
    }

    fn click(&mut self, element: &ElementRef) -> UiResult<()> {
        self.log(format!("click {}", element.0));
        let mut state = self.state.borrow_mut();
        state.element(element)?;
        let el = state.element_mut(&element.0);
        if let Some(error) = el.click_error.clone() {
            match el.click_failures {
                Some(0) => {}
                Some(left) => {
                    el.click_failures = Some(left - 1);
                    return Err(wire_error("click", &error));
                }
                None => return Err(wire_error("click", &error)),
            }
        }
        if let Some(mut hook) = state.click_hooks.remove(&element.0) {
            hook(&mut *state);
            state.click_hooks.insert(element.0.clone(), hook);
        }
        Ok(())
    }

    fn clear(&mut self, element: &ElementRef) -> UiResult<()> {
        self.log(format!("clear {}", element.0));
        let mut state = self.state.borrow_mut();
        state.element(element)?;
        state.element_mut(&element.0).keys.clear();
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementRef, text: &str) -> UiResult<()> {
        self.log(format!("send_keys {}", element.0));
        let mut state = self.state.borrow_mut();
        state.element(element)?;
        state.element_mut(&element.0).keys.push(text.to_string());
        Ok(())
    }

    fn text(&mut self, element: &ElementRef) -> UiResult<String> {
        Ok(self.state.borrow().element(element)?.text.clone())
    }

    fn is_displayed(&mut self, element: &ElementRef) -> UiResult<bool> {
        let state = self.state.borrow();
        let el = state.element(element)?;
        if el.stale {
            return Err(wire_error("is displayed", "stale element reference"));
        }
        Ok(el.displayed)
    }

    fn is_enabled(&mut self, element: &ElementRef) -> UiResult<bool> {
        Ok(self.state.borrow().element(element)?.enabled)
    }

    fn execute_script(&mut self, script: &str, args: Vec<Value>) -> UiResult<Value> {
        let mut state = self.state.borrow_mut();
        state.scripts.push(script.to_string());
        state.calls.push("script".to_string());

        let position = state
            .script_hooks
            .iter()
            .position(|(pattern, _)| script.contains(pattern.as_str()));
        match position {
            Some(i) => {
                let (pattern, mut hook) = state.script_hooks.remove(i);
                let value = hook(&mut *state, &args);
                state.script_hooks.insert(i, (pattern, hook));
                Ok(value)
            }
            None => Ok(Value::Null),
        }
    }

    fn window_handles(&mut self) -> UiResult<Vec<String>> {
        Ok(self
            .state
            .borrow()
            .windows
            .iter()
            .map(|w| w.handle.clone())
            .collect())
    }

    fn current_window(&mut self) -> UiResult<String> {
        self.state
            .borrow()
            .current
            .clone()
            .ok_or_else(|| wire_error("current window", "no such window"))
    }

    fn switch_to_window(&mut self, handle: &str) -> UiResult<()> {
        self.log(format!("switch_window {}", handle));
        let mut state = self.state.borrow_mut();
        if !state.windows.iter().any(|w| w.handle == handle) {
            return Err(wire_error("switch window", "no such window"));
        }
        state.current = Some(handle.to_string());
        state.frame = None;
        Ok(())
    }

    fn close_window(&mut self) -> UiResult<()> {
        self.log("close_window".to_string());
        let mut state = self.state.borrow_mut();
        let current = state.current.take();
        state.windows.retain(|w| Some(&w.handle) != current.as_ref());
        Ok(())
    }

    fn switch_to_frame(&mut self, frame: &ElementRef) -> UiResult<()> {
        self.log(format!("switch_frame {}", frame.0));
        let mut state = self.state.borrow_mut();
        state.element(frame)?;
        state.frame = Some(frame.0.clone());
        Ok(())
    }

    fn switch_to_default_content(&mut self) -> UiResult<()> {
        self.log("default_content".to_string());
        self.state.borrow_mut().frame = None;
        Ok(())
    }

    fn move_to(&mut self, element: &ElementRef) -> UiResult<()> {
        self.log(format!("move_to {}", element.0));
        self.state.borrow().element(element)?;
        Ok(())
    }

    fn drag_and_drop(&mut self, source: &ElementRef, target: &ElementRef) -> UiResult<()> {
        self.log(format!("drag {} {}", source.0, target.0));
        let mut state = self.state.borrow_mut();
        if let Some(mut hook) = state.drag_hook.take() {
            hook(&mut *state);
            state.drag_hook = Some(hook);
        }
        Ok(())
    }

    fn quit(&mut self) -> UiResult<()> {
        self.log("quit".to_string());
        self.state.borrow_mut().quit = true;
        Ok(())
    }
}
