//! Natural-language date and time resolution
//!
//! Syllabus lines spell dates many ways ("October 15th at 2:00 PM",
//! "10/15", "due Friday"). The engine only needs the first recognized
//! expression per line, plus per-field certainty: whether the year and
//! the hour were explicit in the text or defaulted. Certainty is what
//! lets the caller substitute the document year and detect the
//! midnight "time not specified" sentinel.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

/// A resolved date-time expression with per-field certainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// True when a year literal appeared in the text.
    pub year_explicit: bool,
    /// True when a time-of-day phrase appeared in the text.
    pub hour_explicit: bool,
}

impl ResolvedDate {
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Parses the first date/time expression out of free text.
///
/// Injected into the engine so the heuristic library behind it can be
/// swapped without touching the extraction control flow.
pub trait DateResolver: Send + Sync {
    fn resolve_first(&self, text: &str) -> Option<ResolvedDate>;
}

const MONTHS: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("Invalid regex pattern"));

static MONTH_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTHS})\.?[ \t]+(\d{{1,2}})(?:st|nd|rd|th)?(?:[ \t]*,?[ \t]*(\d{{4}}))?"
    ))
    .expect("Invalid regex pattern")
});

static DAY_MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?[ \t]+(?:of[ \t]+)?({MONTHS})\b\.?(?:[ \t]*,?[ \t]*(\d{{4}}))?"
    ))
    .expect("Invalid regex pattern")
});

static NUMERIC_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2}|\d{4}))?\b").expect("Invalid regex pattern")
});

static WEEKDAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("Invalid regex pattern")
});

static TIME_HM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}):(\d{2})(?:[ \t]*(a\.?m\b\.?|p\.?m\b\.?))?")
        .expect("Invalid regex pattern")
});

static TIME_H_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})[ \t]*(a\.?m\b\.?|p\.?m\b\.?)").expect("Invalid regex pattern")
});

static TIME_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(noon|midnight)\b").expect("Invalid regex pattern"));

/// A date expression located in the text; earliest start wins.
struct DateCandidate {
    start: usize,
    date: NaiveDate,
    year_explicit: bool,
}

/// Regex-based resolver for English date and time expressions.
///
/// Dates without a year resolve against a reference date (today by
/// default); tests pin the reference so results are reproducible.
#[derive(Debug, Clone)]
pub struct EnglishDateResolver {
    reference: NaiveDate,
}

impl EnglishDateResolver {
    pub fn new() -> Self {
        Self { reference: Local::now().date_naive() }
    }

    /// Resolve year-less and weekday expressions against a fixed date.
    pub fn with_reference(reference: NaiveDate) -> Self {
        Self { reference }
    }

    fn find_date(&self, text: &str) -> Option<DateCandidate> {
        let mut candidates = Vec::new();

        if let Some(c) = self.find_iso(text) {
            candidates.push(c);
        }
        if let Some(c) = self.find_month_day(text) {
            candidates.push(c);
        }
        if let Some(c) = self.find_day_month(text) {
            candidates.push(c);
        }
        if let Some(c) = self.find_numeric(text) {
            candidates.push(c);
        }
        if let Some(c) = self.find_weekday(text) {
            candidates.push(c);
        }

        // Earliest expression in the text wins; ties go to the pattern
        // checked first above.
        candidates.into_iter().min_by_key(|c| c.start)
    }

    fn find_iso(&self, text: &str) -> Option<DateCandidate> {
        for caps in ISO_DATE_PATTERN.captures_iter(text) {
            let (Ok(year), Ok(month), Ok(day)) = (
                caps[1].parse::<i32>(),
                caps[2].parse::<u32>(),
                caps[3].parse::<u32>(),
            ) else {
                continue;
            };
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(DateCandidate {
                    start: caps.get(0).map(|m| m.start()).unwrap_or(0),
                    date,
                    year_explicit: true,
                });
            }
        }
        None
    }

    fn find_month_day(&self, text: &str) -> Option<DateCandidate> {
        for caps in MONTH_DAY_PATTERN.captures_iter(text) {
            let Some(month) = month_number(&caps[1]) else { continue };
            let Ok(day) = caps[2].parse::<u32>() else { continue };
            let (year, year_explicit) = match caps.get(3) {
                Some(y) => match y.as_str().parse::<i32>() {
                    Ok(y) => (y, true),
                    Err(_) => continue,
                },
                None => (self.reference.year(), false),
            };
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(DateCandidate {
                    start: caps.get(0).map(|m| m.start()).unwrap_or(0),
                    date,
                    year_explicit,
                });
            }
        }
        None
    }

    fn find_day_month(&self, text: &str) -> Option<DateCandidate> {
        for caps in DAY_MONTH_PATTERN.captures_iter(text) {
            let Ok(day) = caps[1].parse::<u32>() else { continue };
            let Some(month) = month_number(&caps[2]) else { continue };
            let (year, year_explicit) = match caps.get(3) {
                Some(y) => match y.as_str().parse::<i32>() {
                    Ok(y) => (y, true),
                    Err(_) => continue,
                },
                None => (self.reference.year(), false),
            };
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(DateCandidate {
                    start: caps.get(0).map(|m| m.start()).unwrap_or(0),
                    date,
                    year_explicit,
                });
            }
        }
        None
    }

    fn find_numeric(&self, text: &str) -> Option<DateCandidate> {
        for caps in NUMERIC_DATE_PATTERN.captures_iter(text) {
            let (Ok(month), Ok(day)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
                continue;
            };
            let (year, year_explicit) = match caps.get(3) {
                Some(y) => {
                    let Ok(raw) = y.as_str().parse::<i32>() else { continue };
                    // Two-digit years are 2000-based
                    let year = if y.as_str().len() == 2 { 2000 + raw } else { raw };
                    (year, true)
                }
                None => (self.reference.year(), false),
            };
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(DateCandidate {
                    start: caps.get(0).map(|m| m.start()).unwrap_or(0),
                    date,
                    year_explicit,
                });
            }
        }
        None
    }

    fn find_weekday(&self, text: &str) -> Option<DateCandidate> {
        let caps = WEEKDAY_PATTERN.captures(text)?;
        let target = weekday_from_name(&caps[1])?;
        let offset = (target.num_days_from_monday() as i64
            - self.reference.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);
        // A bare weekday name means the next occurrence, never today
        let offset = if offset == 0 { 7 } else { offset };
        Some(DateCandidate {
            start: caps.get(0).map(|m| m.start()).unwrap_or(0),
            date: self.reference + Duration::days(offset),
            year_explicit: false,
        })
    }

    fn find_time(text: &str) -> Option<NaiveTime> {
        for caps in TIME_HM_PATTERN.captures_iter(text) {
            let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
                continue;
            };
            if minute > 59 {
                continue;
            }
            let hour = match caps.get(3) {
                Some(meridiem) => match to_hour_24(hour, meridiem.as_str()) {
                    Some(h) => h,
                    None => continue,
                },
                None if hour <= 23 => hour,
                None => continue,
            };
            return NaiveTime::from_hms_opt(hour, minute, 0);
        }

        for caps in TIME_H_PATTERN.captures_iter(text) {
            let Ok(hour) = caps[1].parse::<u32>() else { continue };
            if let Some(hour) = to_hour_24(hour, &caps[2]) {
                return NaiveTime::from_hms_opt(hour, 0, 0);
            }
        }

        if let Some(caps) = TIME_WORD_PATTERN.captures(text) {
            let hour = if caps[1].eq_ignore_ascii_case("noon") { 12 } else { 0 };
            return NaiveTime::from_hms_opt(hour, 0, 0);
        }

        None
    }
}

impl Default for EnglishDateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateResolver for EnglishDateResolver {
    fn resolve_first(&self, text: &str) -> Option<ResolvedDate> {
        let time = Self::find_time(text);

        if let Some(candidate) = self.find_date(text) {
            return Some(ResolvedDate {
                date: candidate.date,
                time: time.unwrap_or(NaiveTime::MIN),
                year_explicit: candidate.year_explicit,
                hour_explicit: time.is_some(),
            });
        }

        // A time-of-day with no date resolves on the reference day
        time.map(|t| ResolvedDate {
            date: self.reference,
            time: t,
            year_explicit: false,
            hour_explicit: true,
        })
    }
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    match prefix {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn to_hour_24(hour: u32, meridiem: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let is_pm = meridiem.to_lowercase().starts_with('p');
    Some(match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}
