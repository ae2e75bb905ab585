//! Per-element field extraction.
//!
//! Each review element's outer HTML is parsed into the crate's own DOM
//! and the fields pulled out with fixed selectors. The selectors are
//! the listing page's generated class names; when the page layout
//! changes they stop matching, which is a hard failure, not something
//! to paper over.

use crate::dom::{self, DomNode, Selector};
use serde::Serialize;

/// Reviewer display name.
pub const NAME_SELECTOR: &str = "span.X43Kjb";
/// Localized long-form date label.
pub const DATE_SELECTOR: &str = "span.p2TkOb";
/// Star bar; the rating lives in its `aria-label`.
pub const RATING_SELECTOR: &str = "div.pf5lIe > div";
pub const RATING_ATTR: &str = "aria-label";
/// Long-form review body. Empty when only the preview was rendered.
pub const FULL_TEXT_SELECTOR: &str = r#"span[jsname="fbQN7e"]"#;
/// Truncated preview, the fallback when the long-form span is empty.
pub const SHORT_TEXT_SELECTOR: &str = r#"span[jsname="bN97Pc"]"#;

/// One review as the page renders it: all fields still localized text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawReview {
    pub name: String,
    pub raw_date: String,
    pub raw_rating: String,
    pub review: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// No element matched the selector inside a review element.
    MissingElement(&'static str),
    /// The element matched but lacks the expected attribute.
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },
    /// A selector constant failed to parse (programming error surfaced
    /// as data, not a panic).
    BadSelector(&'static str),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::MissingElement(selector) => {
                write!(f, "No element matched selector {:?}", selector)
            }
            ExtractError::MissingAttribute {
                selector,
                attribute,
            } => write!(
                f,
                "Element matched by {:?} has no {:?} attribute",
                selector, attribute
            ),
            ExtractError::BadSelector(selector) => {
                write!(f, "Unparseable selector {:?}", selector)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

fn selector(raw: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(raw).ok_or(ExtractError::BadSelector(raw))
}

fn required_text(root: &DomNode, raw: &'static str) -> Result<String, ExtractError> {
    let node = root
        .select_first(&selector(raw)?)
        .ok_or(ExtractError::MissingElement(raw))?;
    Ok(node.text_content())
}

/// Extract the four raw fields from one review element.
pub fn extract_review(root: &DomNode) -> Result<RawReview, ExtractError> {
    let name = required_text(root, NAME_SELECTOR)?;
    let raw_date = required_text(root, DATE_SELECTOR)?;

    let rating_node = root
        .select_first(&selector(RATING_SELECTOR)?)
        .ok_or(ExtractError::MissingElement(RATING_SELECTOR))?;
    let raw_rating = rating_node
        .get_attr(RATING_ATTR)
        .ok_or(ExtractError::MissingAttribute {
            selector: RATING_SELECTOR,
            attribute: RATING_ATTR,
        })?
        .to_string();

    // Long-form body first; the page renders a short preview span when
    // the long-form span is empty or absent.
    let full = root
        .select_first(&selector(FULL_TEXT_SELECTOR)?)
        .map(|node| node.text_content());
    let review = match full {
        Some(text) if !text.is_empty() => text,
        _ => required_text(root, SHORT_TEXT_SELECTOR)?,
    };

    Ok(RawReview {
        name,
        raw_date,
        raw_rating,
        review,
    })
}

/// Extract every review from a page DOM, in document order.
pub fn extract_from_page(page: &DomNode, review_selector: &'static str) -> Result<Vec<RawReview>, ExtractError> {
    page.select(&selector(review_selector)?)
        .into_iter()
        .map(extract_review)
        .collect()
}

/// Extract from outer-HTML fragments as returned by a driver's `find_all`.
pub fn extract_all(fragments: &[String]) -> Result<Vec<RawReview>, ExtractError> {
    fragments
        .iter()
        .map(|html| {
            let tree = dom::parse_html(html);
            extract_review(&tree)
        })
        .collect()
}
