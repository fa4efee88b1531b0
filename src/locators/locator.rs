use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Element lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum By {
    Css,
    XPath,
    Id,
    Name,
    TagName,
    LinkText,
}

impl By {
    fn label(self) -> &'static str {
        match self {
            By::Css => "css",
            By::XPath => "xpath",
            By::Id => "id",
            By::Name => "name",
            By::TagName => "tag",
            By::LinkText => "link",
        }
    }
}

/// A `(strategy, selector)` pair identifying zero or more elements.
///
/// Static locators are `const`; parameterized ones (a calendar day, say)
/// are built at runtime with [`Locator::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub by: By,
    pub selector: Cow<'static, str>,
}

impl Locator {
    pub fn new(by: By, selector: impl Into<Cow<'static, str>>) -> Self {
        Locator {
            by,
            selector: selector.into(),
        }
    }

    pub const fn css(selector: &'static str) -> Self {
        Locator {
            by: By::Css,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn xpath(selector: &'static str) -> Self {
        Locator {
            by: By::XPath,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn id(id: &'static str) -> Self {
        Locator {
            by: By::Id,
            selector: Cow::Borrowed(id),
        }
    }

    pub const fn name(name: &'static str) -> Self {
        Locator {
            by: By::Name,
            selector: Cow::Borrowed(name),
        }
    }

    pub const fn tag_name(tag: &'static str) -> Self {
        Locator {
            by: By::TagName,
            selector: Cow::Borrowed(tag),
        }
    }

    /// The W3C `(using, value)` pair for this locator.
    ///
    /// W3C WebDriver has no id or name strategy, so both lower to CSS
    /// attribute selectors.
    pub fn to_wire(&self) -> (&'static str, String) {
        match self.by {
            By::Css => ("css selector", self.selector.to_string()),
            By::XPath => ("xpath", self.selector.to_string()),
            By::Id => ("css selector", attribute_selector("id", &self.selector)),
            By::Name => ("css selector", attribute_selector("name", &self.selector)),
            By::TagName => ("tag name", self.selector.to_string()),
            By::LinkText => ("link text", self.selector.to_string()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.by.label(), self.selector)
    }
}

fn attribute_selector(attribute: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{}=\"{}\"]", attribute, escaped)
}
