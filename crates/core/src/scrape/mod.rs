//! Session controller: reveal every review element on a listing page,
//! then hand the revealed elements to the extractor.

pub mod extract;

use crate::driver::{Driver, DriverError};
use self::extract::{ExtractError, RawReview};
use std::time::Duration;
use url::Url;

/// Container element holding one review.
pub const REVIEW_SELECTOR: &str = "div.d15Mdf";
/// The "show more" control the listing renders when scrolling stalls.
pub const SHOW_MORE_SELECTOR: &str = "span.CwaK9";

const LISTING_BASE: &str = "https://play.google.com/store/apps/details";

/// Listing URL for an application identifier.
pub fn listing_url(app_id: &str) -> Result<String, ScrapeError> {
    let mut url = Url::parse(LISTING_BASE).map_err(|e| ScrapeError::Url(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("id", app_id)
        .append_pair("showAllReviews", "true");
    Ok(url.to_string())
}

/// Knobs for the expansion loop.
pub struct ScrapeConfig {
    /// Pause after each scroll or show-more click.
    pub settle: Duration,
    /// Upper bound on expansion passes, so an oscillating scroll height
    /// ends the run instead of hanging it.
    pub max_passes: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1500),
            max_passes: 200,
        }
    }
}

#[derive(Debug)]
pub enum ScrapeError {
    Driver(DriverError),
    Extract(ExtractError),
    Url(String),
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::Driver(e) => write!(f, "{}", e),
            ScrapeError::Extract(e) => write!(f, "{}", e),
            ScrapeError::Url(e) => write!(f, "Bad listing URL: {}", e),
        }
    }
}

impl std::error::Error for ScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScrapeError::Driver(e) => Some(e),
            ScrapeError::Extract(e) => Some(e),
            ScrapeError::Url(_) => None,
        }
    }
}

impl From<DriverError> for ScrapeError {
    fn from(e: DriverError) -> Self {
        ScrapeError::Driver(e)
    }
}

impl From<ExtractError> for ScrapeError {
    fn from(e: ExtractError) -> Self {
        ScrapeError::Extract(e)
    }
}

/// One scraping session over a single listing page.
///
/// Owns the driver exclusively for the duration of the run; single
/// threaded, blocking, no parallel sessions.
pub struct Session<D: Driver> {
    driver: D,
    config: ScrapeConfig,
}

impl<D: Driver> Session<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, ScrapeConfig::default())
    }

    pub fn with_config(driver: D, config: ScrapeConfig) -> Self {
        Self { driver, config }
    }

    /// Navigate to the listing page for `app_id`.
    pub fn open(&mut self, app_id: &str) -> Result<(), ScrapeError> {
        let url = listing_url(app_id)?;
        self.driver.navigate(&url)?;
        Ok(())
    }

    /// Reveal all available review elements.
    ///
    /// Each pass clicks the show-more control if present, otherwise
    /// scrolls to the bottom and re-measures the document height.
    /// Terminates when the height is unchanged across consecutive
    /// scroll passes and no show-more control remains (height-stability
    /// policy). Returns the number of scroll/measure passes performed.
    pub fn expand_all(&mut self) -> Result<usize, ScrapeError> {
        let mut scroll_passes = 0;
        let mut total_passes = 0;
        let mut last_height = self.driver.scroll_height()?;

        loop {
            if total_passes >= self.config.max_passes {
                break;
            }
            total_passes += 1;

            if self.driver.click(SHOW_MORE_SELECTOR)? {
                self.driver.wait(self.config.settle);
                continue;
            }

            self.driver.scroll_to_bottom()?;
            self.driver.wait(self.config.settle);
            scroll_passes += 1;

            let height = self.driver.scroll_height()?;
            if height == last_height && !self.driver.exists(SHOW_MORE_SELECTOR)? {
                break;
            }
            last_height = height;
        }

        Ok(scroll_passes)
    }

    /// Extract one [`RawReview`] per revealed review element, in DOM order.
    pub fn collect(&mut self) -> Result<Vec<RawReview>, ScrapeError> {
        let fragments = self.driver.find_all(REVIEW_SELECTOR)?;
        let reviews = extract::extract_all(&fragments)?;
        Ok(reviews)
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}
