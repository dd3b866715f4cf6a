//! Wire-level pieces of the WebDriver protocol

use serde_json::{json, Value};

/// Key under which W3C WebDriver returns element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735a7f7d8d";

/// Element lookup strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Css(selector) => json!({ "using": "css selector", "value": selector }),
            Self::XPath(expression) => json!({ "using": "xpath", "value": expression }),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css:{selector}"),
            Self::XPath(expression) => write!(f, "xpath:{expression}"),
        }
    }
}

/// Opaque handle to an element in the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

impl ElementRef {
    pub fn from_json(value: &Value) -> Option<Self> {
        value.get(ELEMENT_KEY).and_then(Value::as_str).map(|id| Self(id.to_string()))
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Chrome launch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self { headless: false, window_width: 1920, window_height: 1080 }
    }
}

impl BrowserOptions {
    pub fn headless(mut self, enabled: bool) -> Self {
        self.headless = enabled;
        self
    }

    /// `POST /session` body.
    pub fn capabilities(&self) -> Value {
        let mut args = vec![
            format!("--window-size={},{}", self.window_width, self.window_height),
            "--disable-blink-features=AutomationControlled".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }

        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": args,
                        "excludeSwitches": ["enable-automation"],
                        "useAutomationExtension": false
                    }
                }
            }
        })
    }
}

/// Error payload of a failed command: `{"value": {"error", "message"}}`.
pub fn error_details(body: &Value) -> Option<(String, String)> {
    let value = body.get("value")?;
    let error = value.get("error")?.as_str()?.to_string();
    let message = value.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
    Some((error, message))
}
