//! Data model for extracted syllabus items

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of academic item, mutually exclusive.
///
/// Classification picks the first matching kind in a fixed priority
/// order, so the variant order here mirrors that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Exam,
    Quiz,
    Project,
    Assignment,
    Reading,
    Event,
    Deadline,
}

impl ItemType {
    /// All variants, in classification priority order.
    pub const ALL: [ItemType; 7] = [
        ItemType::Exam,
        ItemType::Quiz,
        ItemType::Project,
        ItemType::Assignment,
        ItemType::Reading,
        ItemType::Event,
        ItemType::Deadline,
    ];

    /// Lowercase label used for confidence scoring and title fallbacks.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Quiz => "quiz",
            Self::Project => "project",
            Self::Assignment => "assignment",
            Self::Reading => "reading",
            Self::Event => "event",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One extracted academic item, produced per qualifying line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    /// Human-readable name with date/weight/prefix phrases stripped;
    /// never empty (falls back to "<type> item").
    pub title: String,

    /// Item kind chosen by the first-matching keyword rule.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Due date, always present. Midnight (00:00) means no explicit
    /// time-of-day appeared in the source text; substituting a display
    /// default is the calendar collaborator's job.
    pub due_date: NaiveDateTime,

    /// Percentage or point value, unit dropped after parsing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Free text following a dash or colon that is not purely numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Heuristic quality score, clamped to [0.1, 1.0].
    pub confidence: f64,

    /// The original trimmed line, preserved verbatim for audit/display.
    pub source_line: String,
}

/// Result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Items in source-line order; no dedup, no cross-line merging.
    pub items: Vec<ParsedItem>,
}
