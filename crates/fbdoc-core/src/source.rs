//! Source-text statistics for stored procedures

use serde::{Deserialize, Serialize};

/// Character statistics over a procedure's source text
///
/// Percentages are taken over alphabetic characters only, so punctuation and
/// whitespace never dilute them. A text with no letters reports 0 for both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStats {
    /// The source text itself
    pub text: String,

    /// Character count of the text
    pub length: usize,

    /// Lowercase letters as a percentage of all letters
    pub lower_percent: f64,

    /// Uppercase letters as a percentage of all letters
    pub upper_percent: f64,
}

impl SourceStats {
    /// Analyze a source text, computing all statistics eagerly
    pub fn analyze(text: impl Into<String>) -> Self {
        let text = text.into();

        let length = text.chars().count();
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        let lower = text.chars().filter(|c| c.is_lowercase()).count();
        let upper = text.chars().filter(|c| c.is_uppercase()).count();

        let percent = |count: usize| {
            if letters == 0 {
                0.0
            } else {
                count as f64 / letters as f64 * 100.0
            }
        };

        Self {
            length,
            lower_percent: percent(lower),
            upper_percent: percent(upper),
            text,
        }
    }

    /// Statistics for an empty source text
    pub fn empty() -> Self {
        Self::analyze("")
    }
}

impl Default for SourceStats {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mixed_case_sql() {
        let stats = SourceStats::analyze("SELECT COUNT(*) FROM data_table;");
        assert_eq!(stats.length, 32);
        assert_eq!(stats.lower_percent, 37.5);
        assert_eq!(stats.upper_percent, 62.5);
    }

    #[test]
    fn empty_text_has_zero_percents() {
        let stats = SourceStats::analyze("");
        assert_eq!(stats.length, 0);
        assert_eq!(stats.lower_percent, 0.0);
        assert_eq!(stats.upper_percent, 0.0);
    }

    #[test]
    fn no_letters_has_zero_percents() {
        let stats = SourceStats::analyze("123 *** 456;");
        assert_eq!(stats.length, 12);
        assert_eq!(stats.lower_percent, 0.0);
        assert_eq!(stats.upper_percent, 0.0);
    }

    #[test]
    fn all_lowercase() {
        let stats = SourceStats::analyze("select");
        assert_eq!(stats.lower_percent, 100.0);
        assert_eq!(stats.upper_percent, 0.0);
    }
}
