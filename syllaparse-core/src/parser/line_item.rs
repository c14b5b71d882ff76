//! Per-line extraction of academic items
//!
//! Each non-empty line is processed independently: classify a type
//! from the keyword table, resolve a due date (mandatory), then strip
//! out title, weight, and description and score the result. Every
//! rejection path produces "no item", never an error; noisy syllabus
//! formatting is the normal case, not the exception.

use chrono::{Datelike, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::dates::{DateResolver, EnglishDateResolver, ResolvedDate};
use crate::parser::model::{ItemType, ParsedItem};

/// Lines with fewer characters than this carry too little signal.
const MIN_LINE_CHARS: usize = 10;
/// Below this length the confidence score takes a penalty.
const SHORT_LINE_CHARS: usize = 20;

/// Ordered (pattern, type) priority table. Evaluated top to bottom;
/// the first match wins, so EXAM beats QUIZ beats the date-presence
/// fallback.
static CLASSIFIER_TABLE: Lazy<Vec<(Regex, ItemType)>> = Lazy::new(|| {
    [
        (r"(?i)\b(?:final[ \t]+exams?|midterms?|exams?)\b", ItemType::Exam),
        (r"(?i)\b(?:reading[ \t]+quiz(?:zes)?|quiz(?:zes)?|tests?)\b", ItemType::Quiz),
        (
            r"(?i)\b(?:projects?|deliverables?|milestones?|proposals?|papers?|presentations?)\b",
            ItemType::Project,
        ),
        (
            r"(?i)\b(?:assignments?|homeworks?|problem[ \t]+sets?|psets?|hw|lab[ \t]+reports?|labs?)\b",
            ItemType::Assignment,
        ),
        (r"(?i)\b(?:readings?|read[ \t]+chapters?|chapters?)\b", ItemType::Reading),
        // "presentation" also sits in the PROJECT row, which is checked
        // first, so it can never classify a line as EVENT. The upstream
        // rule set carries the same shadowed entry; kept, not fixed.
        (r"(?i)\b(?:presentations?|class(?:es)?)\b", ItemType::Event),
        (r"(?i)\b(?:due|deadlines?)\b", ItemType::Deadline),
    ]
    .into_iter()
    .map(|(pattern, item_type)| {
        (Regex::new(pattern).expect("Invalid regex pattern"), item_type)
    })
    .collect()
});

/// Stateless per-line extractor; the only cross-line input is the
/// document year handed to `parse_line`.
pub struct LineItemExtractor {
    resolver: Box<dyn DateResolver>,
}

impl LineItemExtractor {
    /// Create an extractor with the default English date resolver.
    pub fn new() -> Self {
        Self::with_resolver(Box::new(EnglishDateResolver::new()))
    }

    /// Create an extractor with an injected date resolver.
    pub fn with_resolver(resolver: Box<dyn DateResolver>) -> Self {
        Self { resolver }
    }

    /// Extract an item from one trimmed line, or nothing.
    ///
    /// `context_year` is the year derived from the document header; it
    /// overrides resolved years that were not explicit in the text.
    pub fn parse_line(&self, line: &str, context_year: Option<i32>) -> Option<ParsedItem> {
        let line = line.trim();
        if line.chars().count() < MIN_LINE_CHARS {
            return None;
        }

        let resolved = self.resolver.resolve_first(line);
        let item_type = classify(line, resolved.is_some())?;
        // A due date is mandatory for emission
        let due_date = apply_context(resolved?, context_year);

        let weight = regex_utils::weight::extract(line);
        let title = extract_title(line, item_type);
        let description = regex_utils::description::extract(line);
        let confidence = score_confidence(line, item_type, weight.is_some());

        Some(ParsedItem {
            title,
            item_type,
            due_date,
            weight,
            description,
            confidence,
            source_line: line.to_string(),
        })
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First matching row of the priority table wins; dated lines with no
/// keyword still look like coursework.
fn classify(line: &str, has_date: bool) -> Option<ItemType> {
    for (pattern, item_type) in CLASSIFIER_TABLE.iter() {
        if pattern.is_match(line) {
            return Some(*item_type);
        }
    }
    if has_date {
        return Some(ItemType::Assignment);
    }
    None
}

/// Merge the resolved expression with the document context: inherit
/// the document year when the text stated none, and force the
/// midnight sentinel when no time phrase was present.
fn apply_context(resolved: ResolvedDate, context_year: Option<i32>) -> NaiveDateTime {
    let mut date = resolved.date;
    if !resolved.year_explicit
        && let Some(year) = context_year
    {
        // Feb 29 against a non-leap document year keeps the resolver's date
        if let Some(adjusted) = date.with_year(year) {
            date = adjusted;
        }
    }
    let time = if resolved.hour_explicit { resolved.time } else { chrono::NaiveTime::MIN };
    date.and_time(time)
}

/// Strip passes applied in order: bullet marker, leading type keyword,
/// trailing due/on/by clause, trailing weight clause.
fn extract_title(line: &str, item_type: ItemType) -> String {
    let pass = regex_utils::title::strip_bullet_prefix(line);
    let pass = regex_utils::title::strip_type_prefix(&pass);
    let pass = regex_utils::title::strip_due_clause(&pass);
    let pass = regex_utils::title::strip_weight_clause(&pass);

    let title = pass.trim().trim_end_matches([' ', '-', '–', ':', ';', ',', '.']).trim();
    if title.is_empty() {
        format!("{} item", item_type.label())
    } else {
        title.to_string()
    }
}

fn score_confidence(line: &str, item_type: ItemType, has_weight: bool) -> f64 {
    let mut confidence: f64 = 0.5;

    if line.to_lowercase().contains(item_type.label()) {
        confidence += 0.2;
    }
    // A resolved date is mandatory for emission, so this term always fires
    confidence += 0.2;
    if has_weight {
        confidence += 0.1;
    }
    if regex_utils::structure::starts_structured(line) {
        confidence += 0.1;
    }
    if line.chars().count() < SHORT_LINE_CHARS {
        confidence -= 0.1;
    }

    confidence.clamp(0.1, 1.0)
}
