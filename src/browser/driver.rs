use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UiResult;
use crate::locators::locator::Locator;

/// W3C web element identifier key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Opaque handle to an element, valid only in the context that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(pub String);

impl ElementRef {
    /// JSON form used in script arguments and frame switches.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(ELEMENT_KEY.to_string(), Value::String(self.0.clone()));
        Value::Object(map)
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        value
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .map(|id| ElementRef(id.to_string()))
    }
}

/// Capability set the facade needs from a browser backend.
///
/// Implementations perform exactly one round trip per call and never wait:
/// polling lives in the facade.
pub trait Driver {
    fn navigate(&mut self, url: &str) -> UiResult<()>;
    fn title(&mut self) -> UiResult<String>;
    fn current_url(&mut self) -> UiResult<String>;

    /// All elements matching `locator` in the current context; empty when none.
    fn find_elements(&mut self, locator: &Locator) -> UiResult<Vec<ElementRef>>;

    fn click(&mut self, element: &ElementRef) -> UiResult<()>;
    fn clear(&mut self, element: &ElementRef) -> UiResult<()>;
    fn send_keys(&mut self, element: &ElementRef, text: &str) -> UiResult<()>;
    fn text(&mut self, element: &ElementRef) -> UiResult<String>;
    fn is_displayed(&mut self, element: &ElementRef) -> UiResult<bool>;
    fn is_enabled(&mut self, element: &ElementRef) -> UiResult<bool>;

    fn execute_script(&mut self, script: &str, args: Vec<Value>) -> UiResult<Value>;

    fn window_handles(&mut self) -> UiResult<Vec<String>>;
    fn current_window(&mut self) -> UiResult<String>;
    fn switch_to_window(&mut self, handle: &str) -> UiResult<()>;
    /// Close the current window; no window is current afterwards.
    fn close_window(&mut self) -> UiResult<()>;
    fn switch_to_frame(&mut self, frame: &ElementRef) -> UiResult<()>;
    fn switch_to_default_content(&mut self) -> UiResult<()>;

    /// Move the pointer over the element's centre (hover).
    fn move_to(&mut self, element: &ElementRef) -> UiResult<()>;

    /// Press on `source`, move to `target`, release.
    fn drag_and_drop(&mut self, source: &ElementRef, target: &ElementRef) -> UiResult<()>;

    fn quit(&mut self) -> UiResult<()>;
}
