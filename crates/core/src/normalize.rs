//! Text-to-typed-value normalization of raw review records.

use crate::locale::Locale;
use crate::scrape::extract::RawReview;
use chrono::NaiveDate;
use serde::Serialize;

/// A review with typed fields, derived deterministically from a [`RawReview`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedReview {
    pub name: String,
    pub date: NaiveDate,
    /// Always 1..=5; labels outside the locale's closed set never get here.
    pub rating: u8,
    pub review: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// The rating label is not one of the locale's five fixed literals.
    UnrecognizedRating(String),
    /// The date string is too short or its day/year parts are not numeric.
    MalformedDate(String),
    /// The month name is not in the locale's table.
    UnknownMonth(String),
    /// Components parsed but do not form a calendar date.
    InvalidDate { year: i32, month: u32, day: u32 },
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::UnrecognizedRating(label) => {
                write!(f, "Unrecognized rating label: {:?}", label)
            }
            NormalizeError::MalformedDate(raw) => write!(f, "Malformed date string: {:?}", raw),
            NormalizeError::UnknownMonth(name) => write!(f, "Unknown month name: {:?}", name),
            NormalizeError::InvalidDate { year, month, day } => {
                write!(f, "Invalid calendar date: {:04}-{:02}-{:02}", year, month, day)
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Parse a localized long date ("12 de março de 2021") by position:
/// day = first 2 chars, month name = chars 5..len-8, year = last 4 chars.
pub fn parse_review_date(raw: &str, locale: &Locale) -> Result<NaiveDate, NormalizeError> {
    let chars: Vec<char> = raw.chars().collect();
    // Shortest well-formed input is "D de MM de YYYY"-shaped; the
    // positional slices below need at least 5 + 8 + 1 chars.
    if chars.len() < 14 {
        return Err(NormalizeError::MalformedDate(raw.to_string()));
    }

    let day_str: String = chars[..2].iter().collect();
    let day: u32 = day_str
        .trim()
        .parse()
        .map_err(|_| NormalizeError::MalformedDate(raw.to_string()))?;

    let month_name: String = chars[5..chars.len() - 8].iter().collect();
    let month_name = month_name.trim();
    let month = locale
        .month_number(month_name)
        .ok_or_else(|| NormalizeError::UnknownMonth(month_name.to_string()))?;

    let year_str: String = chars[chars.len() - 4..].iter().collect();
    let year: i32 = year_str
        .trim()
        .parse()
        .map_err(|_| NormalizeError::MalformedDate(raw.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(NormalizeError::InvalidDate { year, month, day })
}

/// Resolve a rating label to its star count via the locale's closed set.
pub fn parse_rating(raw: &str, locale: &Locale) -> Result<u8, NormalizeError> {
    locale
        .rating(raw)
        .ok_or_else(|| NormalizeError::UnrecognizedRating(raw.to_string()))
}

pub fn normalize(raw: RawReview, locale: &Locale) -> Result<NormalizedReview, NormalizeError> {
    let date = parse_review_date(&raw.raw_date, locale)?;
    let rating = parse_rating(&raw.raw_rating, locale)?;
    Ok(NormalizedReview {
        name: raw.name,
        date,
        rating,
        review: raw.review,
    })
}

/// Normalize a whole collection, preserving input order. The first bad
/// record aborts the batch (no skip-and-continue).
pub fn normalize_all(
    raws: Vec<RawReview>,
    locale: &Locale,
) -> Result<Vec<NormalizedReview>, NormalizeError> {
    raws.into_iter().map(|raw| normalize(raw, locale)).collect()
}
