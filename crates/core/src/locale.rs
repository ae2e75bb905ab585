//! Locale tables for the localized literals the store renders.
//!
//! Month names and rating labels are closed enumerations: parsing is
//! exact lookup against these tables, never general natural-language
//! date handling.

/// Localized literals: long-date month names and the five star-rating
/// labels, index 0 being "1 star".
#[derive(Debug, Clone)]
pub struct Locale {
    months: Vec<(String, u32)>,
    rating_labels: [String; 5],
}

impl Locale {
    pub fn new(months: Vec<(String, u32)>, rating_labels: [String; 5]) -> Self {
        Self {
            months,
            rating_labels,
        }
    }

    /// Brazilian Portuguese, the locale the listing pages render in.
    pub fn pt_br() -> Self {
        let months = [
            ("janeiro", 1),
            ("fevereiro", 2),
            ("março", 3),
            ("abril", 4),
            ("maio", 5),
            ("junho", 6),
            ("julho", 7),
            ("agosto", 8),
            ("setembro", 9),
            ("outubro", 10),
            ("novembro", 11),
            ("dezembro", 12),
        ]
        .into_iter()
        .map(|(name, number)| (name.to_string(), number))
        .collect();

        let rating_labels = [1u32, 2, 3, 4, 5]
            .map(|n| format!("Avaliado com {} de 5 estrelas", n));

        Self {
            months,
            rating_labels,
        }
    }

    /// Month number (1..=12) for a localized month name, if known.
    pub fn month_number(&self, name: &str) -> Option<u32> {
        self.months
            .iter()
            .find(|(month, _)| month == name)
            .map(|(_, number)| *number)
    }

    /// Star rating (1..=5) for a rating label. Exact match only.
    pub fn rating(&self, label: &str) -> Option<u8> {
        self.rating_labels
            .iter()
            .position(|l| l == label)
            .map(|i| i as u8 + 1)
    }
}
