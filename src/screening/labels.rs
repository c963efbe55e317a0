//! Display helpers for scores and resume names

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing duplicate counter such as ` (2)` added when a name is uploaded twice
static DUPLICATE_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d+\)$").unwrap());

/// Qualitative band for a screening score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLabel {
    Excellent,
    Good,
    Fair,
    Weak,
    Poor,
}

impl MatchLabel {
    /// Band a score; each band includes its lower bound
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MatchLabel::Excellent
        } else if score >= 0.6 {
            MatchLabel::Good
        } else if score >= 0.4 {
            MatchLabel::Fair
        } else if score >= 0.2 {
            MatchLabel::Weak
        } else {
            MatchLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLabel::Excellent => "Excellent match",
            MatchLabel::Good => "Good match",
            MatchLabel::Fair => "Fair match",
            MatchLabel::Weak => "Weak match",
            MatchLabel::Poor => "Poor match",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label for a score
pub fn match_label(score: f64) -> MatchLabel {
    MatchLabel::from_score(score)
}

/// Score as a whole percentage, e.g. `0.85` -> `85`
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Row summary such as `85% match (Excellent match)`
pub fn match_summary(score: f64) -> String {
    format!("{}% match ({})", score_percent(score), match_label(score))
}

/// Resume name for listings: no `.pdf` extension, no duplicate counter
pub fn display_name(resume: &str) -> String {
    let stem = resume.strip_suffix(".pdf").unwrap_or(resume);
    DUPLICATE_SUFFIX_REGEX.replace(stem, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(match_label(1.0), MatchLabel::Excellent);
        assert_eq!(match_label(0.8), MatchLabel::Excellent);
        assert_eq!(match_label(0.7999), MatchLabel::Good);
        assert_eq!(match_label(0.6), MatchLabel::Good);
        assert_eq!(match_label(0.5999), MatchLabel::Fair);
        assert_eq!(match_label(0.4), MatchLabel::Fair);
        assert_eq!(match_label(0.3999), MatchLabel::Weak);
        assert_eq!(match_label(0.2), MatchLabel::Weak);
        assert_eq!(match_label(0.1999), MatchLabel::Poor);
        assert_eq!(match_label(0.0), MatchLabel::Poor);
    }

    #[test]
    fn test_every_score_gets_exactly_its_band() {
        for step in 0..=1000 {
            let s = step as f64 / 1000.0;
            let expected = if s >= 0.8 {
                MatchLabel::Excellent
            } else if (0.6..0.8).contains(&s) {
                MatchLabel::Good
            } else if (0.4..0.6).contains(&s) {
                MatchLabel::Fair
            } else if (0.2..0.4).contains(&s) {
                MatchLabel::Weak
            } else {
                MatchLabel::Poor
            };
            assert_eq!(match_label(s), expected, "score {s}");
        }
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(match_label(-0.5), MatchLabel::Poor);
        assert_eq!(match_label(1.7), MatchLabel::Excellent);
        assert_eq!(match_label(f64::NAN), MatchLabel::Poor);
    }

    #[test]
    fn test_match_summary() {
        assert_eq!(match_summary(0.85), "85% match (Excellent match)");
        assert_eq!(match_summary(0.3), "30% match (Weak match)");
        assert_eq!(match_summary(0.0), "0% match (Poor match)");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("alice.pdf"), "alice");
        assert_eq!(display_name("Bat Erdene (1).pdf"), "Bat Erdene");
        assert_eq!(display_name("report(12).pdf"), "report");
        assert_eq!(display_name("notes.txt"), "notes.txt");
        assert_eq!(display_name("v2 (final).pdf"), "v2 (final)");
    }
}
