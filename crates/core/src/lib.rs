pub mod dom;
pub mod driver;
pub mod locale;
pub mod normalize;
pub mod scrape;
pub mod table;

use crate::driver::Driver;
use crate::locale::Locale;
use crate::normalize::NormalizeError;
use crate::scrape::{ScrapeConfig, ScrapeError, Session};
use crate::table::Table;

/// Failure of a full run: session/extraction on one side, text-to-type
/// normalization on the other.
#[derive(Debug)]
pub enum HarvestError {
    Scrape(ScrapeError),
    Normalize(NormalizeError),
}

impl std::fmt::Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestError::Scrape(e) => write!(f, "{}", e),
            HarvestError::Normalize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HarvestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarvestError::Scrape(e) => Some(e),
            HarvestError::Normalize(e) => Some(e),
        }
    }
}

impl From<ScrapeError> for HarvestError {
    fn from(e: ScrapeError) -> Self {
        HarvestError::Scrape(e)
    }
}

impl From<NormalizeError> for HarvestError {
    fn from(e: NormalizeError) -> Self {
        HarvestError::Normalize(e)
    }
}

/// Run the whole pipeline against one listing: open, expand until the
/// page stops growing, extract, normalize, and compact the table.
/// This is the primary entry point for playreviews-core.
pub fn harvest<D: Driver>(
    driver: D,
    app_id: &str,
    config: ScrapeConfig,
    locale: &Locale,
) -> Result<Table, HarvestError> {
    let mut session = Session::with_config(driver, config);
    session.open(app_id)?;
    session.expand_all()?;
    let raws = session.collect()?;
    let rows = normalize::normalize_all(raws, locale)?;
    let mut table = Table::from_reviews(&rows);
    table.shrink();
    Ok(table)
}
