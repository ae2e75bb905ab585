//! Browser-driver capability interface.
//!
//! The session controller and extractor only ever talk to a [`Driver`],
//! so the whole pipeline runs unchanged against a real headless browser
//! or an in-memory scripted page.

pub mod scripted;

#[cfg(feature = "chrome")]
pub mod chrome;

pub use self::scripted::{PageState, ScriptedDriver};

#[cfg(feature = "chrome")]
pub use self::chrome::ChromeDriver;

use std::time::Duration;

/// The operations the scraper needs from a browser.
pub trait Driver {
    /// Load a page. Transport failures are fatal (no retry).
    fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Outer HTML of every element matching a CSS selector, in document order.
    fn find_all(&mut self, selector: &str) -> Result<Vec<String>, DriverError>;

    /// Whether any element matches the selector.
    fn exists(&mut self, selector: &str) -> Result<bool, DriverError>;

    /// Click the first element matching the selector. Returns false if absent.
    fn click(&mut self, selector: &str) -> Result<bool, DriverError>;

    /// Scroll to the bottom of the document.
    fn scroll_to_bottom(&mut self) -> Result<(), DriverError>;

    /// Current `document.body.scrollHeight`.
    fn scroll_height(&mut self) -> Result<i64, DriverError>;

    /// Block for a fixed settle interval.
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug)]
pub enum DriverError {
    /// The browser process could not be started.
    Launch(String),
    /// Navigation, element lookup, or script evaluation failed in the browser.
    Browser(String),
    /// An operation was issued before any page was loaded.
    NoPage,
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Launch(e) => write!(f, "Browser launch failed: {}", e),
            DriverError::Browser(e) => write!(f, "Browser error: {}", e),
            DriverError::NoPage => write!(f, "No page loaded"),
        }
    }
}

impl std::error::Error for DriverError {}
