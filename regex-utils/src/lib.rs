//! Regex utilities for syllaparse
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled patterns for course name extraction from the header region
pub mod course {
    use super::*;

    /// Department code plus number, e.g. "CS 101 - Introduction to Programming".
    /// The capture spans both the code and the trailing title.
    pub static CODE_TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"([A-Z]{2,4}\s*\d{3}[A-Z]?[ \t]*[-:–]?[ \t]*[^,\n]+)")
            .expect("Invalid regex pattern")
    });

    /// A header line ending in a course-like keyword; anchored per line
    /// so the rule fires on any line of the header region.
    pub static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?im)^([^,\n]+(?:course|class|seminar))").expect("Invalid regex pattern")
    });

    /// Leading word run ending in a number, e.g. "Biology 12".
    pub static NUMBERED_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^([A-Za-z][A-Za-z ]*\d+[A-Za-z]?)").expect("Invalid regex pattern")
    });

    /// Extract the course name; first matching pattern wins.
    pub fn extract(text: &str) -> Option<String> {
        for pattern in [&CODE_TITLE_PATTERN, &KEYWORD_PATTERN, &NUMBERED_PATTERN] {
            if let Some(caps) = pattern.captures(text) {
                return caps.get(1).map(|m| m.as_str().trim().to_string());
            }
        }
        None
    }
}

/// Compiled patterns for instructor extraction
pub mod instructor {
    use super::*;

    /// "Professor: Jane Doe", "Dr. Smith", "Instructor J. Roe". The name class
    /// excludes newlines and commas so the capture stops at a clause boundary.
    pub static LABELED_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:professor|instructor|prof|dr)\b\.?\s*:?[ \t]*([A-Za-z][A-Za-z. \t]*)")
            .expect("Invalid regex pattern")
    });

    /// "taught by Jane Doe".
    pub static TAUGHT_BY_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)taught\s+by[ \t]*([A-Za-z][A-Za-z. \t]*)")
            .expect("Invalid regex pattern")
    });

    /// Extract the instructor name; first matching pattern wins.
    pub fn extract(text: &str) -> Option<String> {
        for pattern in [&LABELED_PATTERN, &TAUGHT_BY_PATTERN] {
            if let Some(caps) = pattern.captures(text) {
                return caps.get(1).map(|m| m.as_str().trim().to_string());
            }
        }
        None
    }
}

/// Compiled pattern for semester and year extraction
pub mod term {
    use super::*;

    pub static SEMESTER_YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(fall|spring|summer|winter)\s*(\d{4})\b")
            .expect("Invalid regex pattern")
    });

    /// Extract semester (lowercased) and year together; both or neither.
    pub fn extract(text: &str) -> Option<(String, i32)> {
        let caps = SEMESTER_YEAR_PATTERN.captures(text)?;
        let semester = caps.get(1)?.as_str().to_lowercase();
        let year = caps.get(2)?.as_str().parse::<i32>().ok()?;
        Some((semester, year))
    }
}

/// Compiled patterns for grade weight extraction
pub mod weight {
    use super::*;

    pub static PERCENT_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("Invalid regex pattern"));

    pub static POINTS_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:points?|pts?)\b").expect("Invalid regex pattern")
    });

    /// Extract a weight as a plain number, percent first, then points.
    /// The unit is dropped; percent and point magnitudes are not normalized.
    pub fn extract(text: &str) -> Option<f64> {
        for pattern in [&PERCENT_PATTERN, &POINTS_PATTERN] {
            if let Some(caps) = pattern.captures(text) {
                if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                    return Some(value);
                }
            }
        }
        None
    }
}

/// Compiled pattern for free-text description extraction
pub mod description {
    use super::*;

    /// A run of at least 10 characters after a dash or colon, with no digits
    /// and no percent sign (those belong to dates and weights).
    pub static AFTER_SEPARATOR_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[-:–]\s*([^%\d]{10,})").expect("Invalid regex pattern"));

    pub fn extract(text: &str) -> Option<String> {
        AFTER_SEPARATOR_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Title cleanup passes, each a small pure function over the line text
pub mod title {
    use super::*;
    use std::borrow::Cow;

    pub static BULLET_PREFIX_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[ \t]*(?:[-•*–][ \t]*)+").expect("Invalid regex pattern"));

    pub static TYPE_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)^(?:(?:final|midterm)[ \t]+exam|lab[ \t]+report|problem[ \t]+set|assignment|homework|midterm|project|reading|quiz|exam|pset|lab|hw)s?\b[ \t]*#?[ \t]*\d*[ \t]*[:.\-–]?[ \t]*",
        )
        .expect("Invalid regex pattern")
    });

    pub static DUE_CLAUSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(?:^|[ \t])(?:due|on|by)\b.*$").expect("Invalid regex pattern")
    });

    pub static WEIGHT_CLAUSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"[ \t]*[-–—]?[ \t]*\d+(?:\.\d+)?[ \t]*%.*$").expect("Invalid regex pattern")
    });

    pub fn strip_bullet_prefix(text: &str) -> Cow<'_, str> {
        BULLET_PREFIX_PATTERN.replace(text, "")
    }

    pub fn strip_type_prefix(text: &str) -> Cow<'_, str> {
        TYPE_PREFIX_PATTERN.replace(text, "")
    }

    pub fn strip_due_clause(text: &str) -> Cow<'_, str> {
        DUE_CLAUSE_PATTERN.replace(text, "")
    }

    pub fn strip_weight_clause(text: &str) -> Cow<'_, str> {
        WEIGHT_CLAUSE_PATTERN.replace(text, "")
    }
}

/// Structural signals used by confidence scoring
pub mod structure {
    use super::*;

    pub static STRUCTURED_START_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[ \t]*[0-9•*–-]").expect("Invalid regex pattern"));

    /// True when the line starts with a digit, bullet, or dash.
    pub fn starts_structured(line: &str) -> bool {
        STRUCTURED_START_PATTERN.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_code_with_title() {
        let header = "CS 101 - Introduction to Programming\nFall 2024";
        let name = course::extract(header).unwrap();
        assert!(name.contains("CS 101"));
        assert!(name.contains("Introduction to Programming"));
    }

    #[test]
    fn test_course_keyword_fallback() {
        let name = course::extract("Advanced Pottery Seminar\nSpring 2025").unwrap();
        assert_eq!(name, "Advanced Pottery Seminar");
    }

    #[test]
    fn test_course_keyword_matches_later_header_line() {
        let name =
            course::extract("Department of English\nModern Poetry Seminar\nSpring 2025").unwrap();
        assert_eq!(name, "Modern Poetry Seminar");
    }

    #[test]
    fn test_course_numbered_fallback() {
        let name = course::extract("Biology 12\ninstructor tba").unwrap();
        assert_eq!(name, "Biology 12");
    }

    #[test]
    fn test_instructor_labels() {
        assert_eq!(instructor::extract("Professor: Dr. Smith").unwrap(), "Dr. Smith");
        assert_eq!(instructor::extract("Instructor Jane Doe, Rm 204").unwrap(), "Jane Doe");
        assert_eq!(instructor::extract("taught by John Roe").unwrap(), "John Roe");
        assert_eq!(instructor::extract("No names here"), None);
    }

    #[test]
    fn test_instructor_stops_at_line_end() {
        let name = instructor::extract("Professor: Dr. Smith\nOffice: Room 12").unwrap();
        assert_eq!(name, "Dr. Smith");
    }

    #[test]
    fn test_term_extraction() {
        assert_eq!(term::extract("Fall 2024"), Some(("fall".to_string(), 2024)));
        assert_eq!(term::extract("spring2025 session"), Some(("spring".to_string(), 2025)));
        assert_eq!(term::extract("Fall semester"), None);
        assert_eq!(term::extract("the year 2024"), None);
    }

    #[test]
    fn test_weight_percent_and_points() {
        assert_eq!(weight::extract("worth 15%"), Some(15.0));
        assert_eq!(weight::extract("worth 15 %"), Some(15.0));
        assert_eq!(weight::extract("worth 15 points"), Some(15.0));
        assert_eq!(weight::extract("worth 12.5 pts"), Some(12.5));
        assert_eq!(weight::extract("no weight here"), None);
    }

    #[test]
    fn test_weight_percent_wins_over_points() {
        assert_eq!(weight::extract("100 points, 25% of grade"), Some(25.0));
    }

    #[test]
    fn test_description_rejects_numeric_runs() {
        assert_eq!(
            description::extract("Essay - a close reading of the assigned text"),
            Some("a close reading of the assigned text".to_string())
        );
        assert_eq!(description::extract("Essay - 30% of grade"), None);
        assert_eq!(description::extract("Essay - short"), None);
    }

    #[test]
    fn test_title_strip_passes() {
        assert_eq!(title::strip_bullet_prefix("- Essay 1 due Friday"), "Essay 1 due Friday");
        assert_eq!(title::strip_type_prefix("Assignment 3: Essay"), "Essay");
        assert_eq!(title::strip_type_prefix("Midterm exam on Oct 15"), "on Oct 15");
        assert_eq!(title::strip_due_clause("Essay 1 due Friday"), "Essay 1");
        assert_eq!(title::strip_weight_clause("Essay 1 - 15% of grade"), "Essay 1");
    }

    #[test]
    fn test_structured_start() {
        assert!(structure::starts_structured("1. Essay due Friday"));
        assert!(structure::starts_structured("- Essay due Friday"));
        assert!(structure::starts_structured("• Essay due Friday"));
        assert!(!structure::starts_structured("Essay due Friday"));
    }
}
