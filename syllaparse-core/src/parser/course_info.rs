//! Course metadata extraction from the document header

use regex_utils::{course, instructor, term};

/// Metadata pulled from the top of a syllabus. Every field is
/// optional; extraction degrades gracefully on sparse headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseInfo {
    pub course_name: Option<String>,
    pub instructor: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
}

/// Scan the header region for course name, instructor, and term.
///
/// First match wins per field. Semester and year come from one
/// combined expression, so they are set or absent together. Never
/// fails; absent fields stay `None`.
pub fn extract_course_info(header: &str) -> CourseInfo {
    let (semester, year) = match term::extract(header) {
        Some((semester, year)) => (Some(semester), Some(year)),
        None => (None, None),
    };

    CourseInfo {
        course_name: course::extract(header),
        instructor: instructor::extract(header),
        semester,
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let header = "CS 101 - Introduction to Programming\nFall 2024\nProfessor: Dr. Smith";
        let info = extract_course_info(header);

        assert!(info.course_name.unwrap().contains("Introduction to Programming"));
        assert!(info.instructor.unwrap().contains("Smith"));
        assert_eq!(info.semester.as_deref(), Some("fall"));
        assert_eq!(info.year, Some(2024));
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(extract_course_info(""), CourseInfo::default());
    }

    #[test]
    fn test_partial_header() {
        let info = extract_course_info("Semester: Spring 2025\nWeek 1: introductions");
        assert_eq!(info.semester.as_deref(), Some("spring"));
        assert_eq!(info.year, Some(2025));
        assert_eq!(info.course_name, None);
        assert_eq!(info.instructor, None);
    }

    #[test]
    fn test_semester_and_year_set_together() {
        // Year digits without a semester word are not a term
        let info = extract_course_info("History 210\nSection 4, room 2024");
        assert_eq!(info.semester, None);
        assert_eq!(info.year, None);
    }

    #[test]
    fn test_keyword_course_name() {
        let info = extract_course_info("Modern Poetry Seminar\nTaught by Jane Doe");
        assert_eq!(info.course_name.as_deref(), Some("Modern Poetry Seminar"));
        assert!(info.instructor.unwrap().contains("Jane Doe"));
    }

    #[test]
    fn test_first_match_wins_per_field() {
        let header = "CS 101 - Systems\nCS 202 - Networks\nInstructor: A. One\nProfessor: B. Two";
        let info = extract_course_info(header);
        assert!(info.course_name.unwrap().starts_with("CS 101"));
        assert!(info.instructor.unwrap().contains("A. One"));
    }
}
