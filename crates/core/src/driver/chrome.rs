//! Real driver over a headless Chrome instance.

use super::{Driver, DriverError};
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use std::sync::Arc;

const SCROLL_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight)";
const SCROLL_HEIGHT_JS: &str = "document.body.scrollHeight";

/// Drives a single tab of a headless Chrome browser.
///
/// The browser handle is kept alive for the lifetime of the driver; the
/// process shuts down when the driver is dropped.
pub struct ChromeDriver {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeDriver {
    pub fn launch() -> Result<Self, DriverError> {
        let options = LaunchOptionsBuilder::default()
            .headless(true)
            .build()
            .map_err(|e| DriverError::Launch(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| DriverError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| DriverError::Launch(e.to_string()))?;
        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl Driver for ChromeDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| DriverError::Browser(e.to_string()))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| DriverError::Browser(e.to_string()))?;
        Ok(())
    }

    fn find_all(&mut self, selector: &str) -> Result<Vec<String>, DriverError> {
        // headless_chrome reports "no match" as an error; treat it as empty.
        let elements = match self.tab.find_elements(selector) {
            Ok(elements) => elements,
            Err(_) => return Ok(Vec::new()),
        };
        elements
            .iter()
            .map(|el| {
                el.get_content()
                    .map_err(|e| DriverError::Browser(e.to_string()))
            })
            .collect()
    }

    fn exists(&mut self, selector: &str) -> Result<bool, DriverError> {
        Ok(self.tab.find_element(selector).is_ok())
    }

    fn click(&mut self, selector: &str) -> Result<bool, DriverError> {
        match self.tab.find_element(selector) {
            Ok(element) => {
                element
                    .click()
                    .map_err(|e| DriverError::Browser(e.to_string()))?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        self.tab
            .evaluate(SCROLL_BOTTOM_JS, false)
            .map_err(|e| DriverError::Browser(e.to_string()))?;
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<i64, DriverError> {
        let result = self
            .tab
            .evaluate(SCROLL_HEIGHT_JS, false)
            .map_err(|e| DriverError::Browser(e.to_string()))?;
        result
            .value
            .as_ref()
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                DriverError::Browser("scrollHeight did not evaluate to a number".to_string())
            })
    }
}
