use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::browser::driver::{Driver, ElementRef};
use crate::error::{UiError, UiResult};
use crate::locators::locator::Locator;

/// Body of `POST /session`.
#[derive(Debug, Serialize)]
pub struct NewSessionRequest {
    pub capabilities: CapabilityRequest,
}

#[derive(Debug, Serialize)]
pub struct CapabilityRequest {
    #[serde(rename = "alwaysMatch")]
    pub always_match: Value,
}

/// Body of `POST /session/{id}/elements`.
#[derive(Debug, Serialize)]
pub struct FindRequest {
    pub using: &'static str,
    pub value: String,
}

impl FindRequest {
    pub fn from_locator(locator: &Locator) -> Self {
        let (using, value) = locator.to_wire();
        FindRequest { using, value }
    }
}

/// Body of `POST /session/{id}/execute/sync`.
#[derive(Debug, Serialize)]
pub struct ScriptRequest<'a> {
    pub script: &'a str,
    pub args: Vec<Value>,
}

/// Every WebDriver response wraps its payload in `value`.
#[derive(Debug, Deserialize)]
pub struct WireResponse {
    pub value: Value,
}

/// `value` of a failed command.
#[derive(Debug, Deserialize)]
pub struct WireError {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Chrome capabilities for a new session.
pub fn chrome_capabilities(headless: bool, window_size: Option<(u32, u32)>) -> Value {
    let mut args = vec!["--log-level=3".to_string()];
    if headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
    }
    if let Some((width, height)) = window_size {
        args.push(format!("--window-size={},{}", width, height));
    }

    json!({
        "browserName": "chrome",
        "goog:chromeOptions": {
            "args": args,
            "excludeSwitches": ["enable-logging"],
        },
    })
}

/// Map a raw HTTP exchange to the `value` payload or a typed error.
pub fn decode_response(command: &str, success: bool, body: &str) -> UiResult<Value> {
    let parsed: WireResponse = serde_json::from_str(body).map_err(|e| UiError::Protocol {
        command: command.to_string(),
        detail: format!("{} (body: {})", e, body),
    })?;

    if success {
        return Ok(parsed.value);
    }

    match serde_json::from_value::<WireError>(parsed.value) {
        Ok(err) => Err(UiError::WebDriver {
            command: command.to_string(),
            error: err.error,
            message: err.message,
        }),
        Err(e) => Err(UiError::Protocol {
            command: command.to_string(),
            detail: format!("error response without error code: {}", e),
        }),
    }
}

/// A W3C WebDriver session over blocking HTTP.
pub struct WebDriverClient {
    http: Client,
    base_url: String,
    session_id: String,
    closed: bool,
}

impl WebDriverClient {
    /// Open a new session on the server at `base_url`.
    pub fn connect(base_url: &str, capabilities: Value, http_timeout: Duration) -> UiResult<Self> {
        let http = Client::builder().timeout(http_timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let request = NewSessionRequest {
            capabilities: CapabilityRequest {
                always_match: capabilities,
            },
        };
        let value = exchange(
            &http,
            Method::POST,
            &format!("{}/session", base_url),
            Some(serde_json::to_value(&request)?),
            "new session",
        )?;

        let session_id = value["sessionId"]
            .as_str()
            .ok_or_else(|| UiError::Protocol {
                command: "new session".into(),
                detail: "no sessionId in response".into(),
            })?
            .to_string();

        debug!(%session_id, "webdriver session created");

        Ok(WebDriverClient {
            http,
            base_url,
            session_id,
            closed: false,
        })
    }

    /// Whether the server at `base_url` reports itself ready.
    pub fn server_ready(http: &Client, base_url: &str) -> bool {
        let url = format!("{}/status", base_url.trim_end_matches('/'));
        match exchange(http, Method::GET, &url, None, "status") {
            Ok(value) => value["ready"].as_bool().unwrap_or(false),
            Err(_) => false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Page-load and script timeouts; implicit wait stays zero since the
    /// facade does its own polling.
    pub fn set_timeouts(&mut self, page_load: Duration, script: Duration) -> UiResult<()> {
        self.post("timeouts", timeouts_body(page_load, script), "set timeouts")?;
        Ok(())
    }

    fn session_url(&self, path: &str) -> String {
        format!("{}/session/{}/{}", self.base_url, self.session_id, path)
    }

    fn get(&self, path: &str, command: &str) -> UiResult<Value> {
        exchange(&self.http, Method::GET, &self.session_url(path), None, command)
    }

    fn post(&self, path: &str, body: Value, command: &str) -> UiResult<Value> {
        exchange(
            &self.http,
            Method::POST,
            &self.session_url(path),
            Some(body),
            command,
        )
    }

    fn delete(&self, path: &str, command: &str) -> UiResult<Value> {
        exchange(&self.http, Method::DELETE, &self.session_url(path), None, command)
    }

    fn element_path(element: &ElementRef, action: &str) -> String {
        format!("element/{}/{}", element.0, action)
    }

    fn string_value(value: Value, command: &str) -> UiResult<String> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(UiError::Protocol {
                command: command.to_string(),
                detail: format!("expected string, got {}", other),
            }),
        }
    }

    fn bool_value(value: Value, command: &str) -> UiResult<bool> {
        value.as_bool().ok_or_else(|| UiError::Protocol {
            command: command.to_string(),
            detail: format!("expected bool, got {}", value),
        })
    }

    fn perform_actions(&self, actions: Value, command: &str) -> UiResult<()> {
        self.post("actions", json!({ "actions": [actions] }), command)?;
        self.delete("actions", "release actions")?;
        Ok(())
    }
}

fn exchange(
    http: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
    command: &str,
) -> UiResult<Value> {
    let request = http.request(method, url);
    let request = match body {
        Some(body) => request.json(&body),
        None => request,
    };
    let response = request.send()?;
    let success = response.status().is_success();
    let text = response.text()?;
    decode_response(command, success, &text)
}

/// Largest timeout the protocol accepts (2^53 - 1 ms).
pub const MAX_TIMEOUT_MS: u64 = (1 << 53) - 1;

/// Body of `POST timeouts`. Values past [`MAX_TIMEOUT_MS`] are clamped.
pub fn timeouts_body(page_load: Duration, script: Duration) -> Value {
    let ms = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX).min(MAX_TIMEOUT_MS);
    json!({
        "pageLoad": ms(page_load),
        "script": ms(script),
        "implicit": 0,
    })
}

/// Pointer action sequence that moves over `element`.
pub fn hover_actions(element: &ElementRef) -> Value {
    json!({
        "type": "pointer",
        "id": "mouse",
        "parameters": { "pointerType": "mouse" },
        "actions": [
            { "type": "pointerMove", "duration": 100, "origin": element.to_json(), "x": 0, "y": 0 },
        ],
    })
}

/// Pointer action sequence that drags `source` onto `target`.
pub fn drag_actions(source: &ElementRef, target: &ElementRef) -> Value {
    json!({
        "type": "pointer",
        "id": "mouse",
        "parameters": { "pointerType": "mouse" },
        "actions": [
            { "type": "pointerMove", "duration": 0, "origin": source.to_json(), "x": 0, "y": 0 },
            { "type": "pointerDown", "button": 0 },
            { "type": "pause", "duration": 100 },
            { "type": "pointerMove", "duration": 250, "origin": target.to_json(), "x": 0, "y": 0 },
            { "type": "pointerUp", "button": 0 },
        ],
    })
}

impl Driver for WebDriverClient {
    fn navigate(&mut self, url: &str) -> UiResult<()> {
        self.post("url", json!({ "url": url }), "navigate")?;
        Ok(())
    }

    fn title(&mut self) -> UiResult<String> {
        let value = self.get("title", "title")?;
        Self::string_value(value, "title")
    }

    fn current_url(&mut self) -> UiResult<String> {
        let value = self.get("url", "current url")?;
        Self::string_value(value, "current url")
    }

    fn find_elements(&mut self, locator: &Locator) -> UiResult<Vec<ElementRef>> {
        let request = FindRequest::from_locator(locator);
        let value = self.post("elements", serde_json::to_value(&request)?, "find elements")?;
        let items = value.as_array().ok_or_else(|| UiError::Protocol {
            command: "find elements".into(),
            detail: "expected an array".into(),
        })?;
        Ok(items.iter().filter_map(ElementRef::from_json).collect())
    }

    fn click(&mut self, element: &ElementRef) -> UiResult<()> {
        self.post(&Self::element_path(element, "click"), json!({}), "click")?;
        Ok(())
    }

    fn clear(&mut self, element: &ElementRef) -> UiResult<()> {
        self.post(&Self::element_path(element, "clear"), json!({}), "clear")?;
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementRef, text: &str) -> UiResult<()> {
        self.post(
            &Self::element_path(element, "value"),
            json!({ "text": text }),
            "send keys",
        )?;
        Ok(())
    }

    fn text(&mut self, element: &ElementRef) -> UiResult<String> {
        let value = self.get(&Self::element_path(element, "text"), "element text")?;
        Self::string_value(value, "element text")
    }

    fn is_displayed(&mut self, element: &ElementRef) -> UiResult<bool> {
        let value = self.get(&Self::element_path(element, "displayed"), "is displayed")?;
        Self::bool_value(value, "is displayed")
    }

    fn is_enabled(&mut self, element: &ElementRef) -> UiResult<bool> {
        let value = self.get(&Self::element_path(element, "enabled"), "is enabled")?;
        Self::bool_value(value, "is enabled")
    }

    fn execute_script(&mut self, script: &str, args: Vec<Value>) -> UiResult<Value> {
        let request = ScriptRequest { script, args };
        self.post("execute/sync", serde_json::to_value(&request)?, "execute script")
    }

    fn window_handles(&mut self) -> UiResult<Vec<String>> {
        let value = self.get("window/handles", "window handles")?;
        serde_json::from_value(value).map_err(UiError::from)
    }

    fn current_window(&mut self) -> UiResult<String> {
        let value = self.get("window", "current window")?;
        Self::string_value(value, "current window")
    }

    fn switch_to_window(&mut self, handle: &str) -> UiResult<()> {
        self.post("window", json!({ "handle": handle }), "switch window")?;
        Ok(())
    }

    fn close_window(&mut self) -> UiResult<()> {
        self.delete("window", "close window")?;
        Ok(())
    }

    fn switch_to_frame(&mut self, frame: &ElementRef) -> UiResult<()> {
        self.post("frame", json!({ "id": frame.to_json() }), "switch frame")?;
        Ok(())
    }

    fn switch_to_default_content(&mut self) -> UiResult<()> {
        self.post("frame", json!({ "id": null }), "default content")?;
        Ok(())
    }

    fn move_to(&mut self, element: &ElementRef) -> UiResult<()> {
        self.perform_actions(hover_actions(element), "hover")
    }

    fn drag_and_drop(&mut self, source: &ElementRef, target: &ElementRef) -> UiResult<()> {
        self.perform_actions(drag_actions(source, target), "drag and drop")
    }

    fn quit(&mut self) -> UiResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let url = format!("{}/session/{}", self.base_url, self.session_id);
        exchange(&self.http, Method::DELETE, &url, None, "delete session")?;
        debug!(session_id = %self.session_id, "webdriver session deleted");
        Ok(())
    }
}
