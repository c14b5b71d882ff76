//! Line-oriented syllabus parsing
//!
//! The pipeline has two passes over the same normalized line list: a
//! header scan for course metadata, then an independent per-line item
//! extraction. Lines never merge, so the second pass parallelizes
//! freely on large documents.

pub mod course_info;
pub mod dates;
pub mod line_item;
pub mod model;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::parser::course_info::extract_course_info;
use crate::parser::dates::DateResolver;
use crate::parser::line_item::LineItemExtractor;
use crate::parser::model::{ParseResult, ParsedItem};

/// Number of leading non-empty lines scanned for course metadata.
const HEADER_LINES: usize = 5;

/// Line count at which per-line extraction fans out across threads.
/// Classification is regex-bound, so small documents stay serial.
const PARALLEL_LINE_THRESHOLD: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input contained no text at all.
    #[error("syllabus text is empty")]
    EmptyInput,
}

/// Parses raw syllabus text into course metadata and academic items.
pub struct SyllabusParser {
    extractor: LineItemExtractor,
}

impl SyllabusParser {
    /// Create a parser with the default English date resolver, which
    /// anchors relative expressions to today's local date.
    pub fn new() -> Self {
        Self {
            extractor: LineItemExtractor::new(),
        }
    }

    /// Create a parser with an injected date resolver. Used by callers
    /// that need deterministic output, such as tests and replays.
    pub fn with_resolver(resolver: Box<dyn DateResolver>) -> Self {
        Self {
            extractor: LineItemExtractor::with_resolver(resolver),
        }
    }

    /// Parse one document.
    ///
    /// Lines that yield no item are skipped silently; the only error is
    /// empty input. Items come back in source-line order regardless of
    /// whether extraction ran serial or parallel.
    pub fn parse(&self, content: &str) -> Result<ParseResult, ParseError> {
        if content.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<&str> = normalized
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let header = lines
            .iter()
            .take(HEADER_LINES)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        let info = extract_course_info(&header);

        let items: Vec<ParsedItem> = if lines.len() >= PARALLEL_LINE_THRESHOLD {
            lines
                .par_iter()
                .filter_map(|line| self.extractor.parse_line(line, info.year))
                .collect()
        } else {
            lines
                .iter()
                .filter_map(|line| self.extractor.parse_line(line, info.year))
                .collect()
        };

        debug!(
            lines = lines.len(),
            items = items.len(),
            "parsed syllabus text"
        );

        Ok(ParseResult {
            course_name: info.course_name,
            instructor: info.instructor,
            semester: info.semester,
            year: info.year,
            items,
        })
    }
}

impl Default for SyllabusParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dates::EnglishDateResolver;
    use crate::parser::model::ItemType;
    use chrono::{Datelike, NaiveDate};
    use proptest::prelude::*;

    fn parser() -> SyllabusParser {
        SyllabusParser::with_resolver(Box::new(EnglishDateResolver::with_reference(
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
        )))
    }

    const SAMPLE: &str = "\
CS 101 - Introduction to Programming
Fall 2024
Professor: Dr. Smith

Assignment 1: Variables and types due September 20th - 10%
Midterm exam on October 15th at 2:00 PM - 30% of grade
Reading: Chapter 3-4 for discussion September 25
";

    #[test]
    fn test_metadata_and_items() {
        let result = parser().parse(SAMPLE).unwrap();

        assert!(result.course_name.unwrap().contains("Introduction to Programming"));
        assert!(result.instructor.unwrap().contains("Smith"));
        assert_eq!(result.semester.as_deref(), Some("fall"));
        assert_eq!(result.year, Some(2024));
        assert_eq!(result.items.len(), 3);

        assert_eq!(result.items[0].item_type, ItemType::Assignment);
        assert_eq!(result.items[1].item_type, ItemType::Exam);
        assert_eq!(result.items[2].item_type, ItemType::Reading);
    }

    #[test]
    fn test_header_year_applied_to_items() {
        let result = parser().parse(SAMPLE).unwrap();
        for item in &result.items {
            assert_eq!(
                item.due_date.date().year(),
                2024,
                "line: {}",
                item.source_line
            );
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let parser = parser();
        assert_eq!(parser.parse(""), Err(ParseError::EmptyInput));
        assert_eq!(parser.parse("   \n\t\n  "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_items_only_no_metadata() {
        // Leading digit keeps the numbered course-name fallback from firing
        let result = parser()
            .parse("1. Quiz covering the syllabus on September 12")
            .unwrap();
        assert_eq!(result.course_name, None);
        assert_eq!(result.year, None);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn test_crlf_normalization() {
        let unix = parser().parse(SAMPLE).unwrap();
        let dos = parser().parse(&SAMPLE.replace('\n', "\r\n")).unwrap();
        assert_eq!(unix, dos);
    }

    #[test]
    fn test_metadata_only_beyond_header_window() {
        // Term info past the header window is not picked up
        let text = "\
line one of notes here
line two of notes here
line three of notes here
line four of notes here
line five of notes here
Fall 2024
Homework 1 due September 20th please submit online
";
        let result = parser().parse(text).unwrap();
        assert_eq!(result.semester, None);
        assert_eq!(result.year, None);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let mut text = String::from("CS 101 - Systems\nFall 2024\n");
        for week in 1..=120 {
            text.push_str(&format!("Week {week} quiz on 10/3 covering lecture notes\n"));
            text.push_str(&format!("Week {week} reading chapter {week} due 10/1\n"));
            text.push_str(&format!("Week {week} office hours, no deliverables\n"));
        }

        let parser = parser();
        let first = parser.parse(&text).unwrap();
        let second = parser.parse(&text).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.items.len(), 240);
        // Parallel extraction keeps source-line order
        assert!(first.items[0].source_line.starts_with("Week 1 "));
        assert!(first.items[239].source_line.starts_with("Week 120 "));
    }

    proptest! {
        #[test]
        fn prop_parse_is_deterministic(text in "[ -~\n]{0,400}") {
            let parser = parser();
            let first = parser.parse(&text);
            let second = parser.parse(&text);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_confidence_and_dates_in_bounds(text in "[ -~\n]{1,400}") {
            let parser = parser();
            if let Ok(result) = parser.parse(&text) {
                for item in &result.items {
                    prop_assert!((0.1..=1.0).contains(&item.confidence));
                    prop_assert!(!item.title.is_empty());
                }
            }
        }

        #[test]
        fn prop_short_lines_never_yield_items(line in ".{0,9}") {
            let parser = parser();
            if let Ok(result) = parser.parse(&line) {
                prop_assert!(result.items.is_empty());
            }
        }
    }
}
