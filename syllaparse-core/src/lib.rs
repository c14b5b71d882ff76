//! Core syllabus extraction engine for syllaparse
//!
//! This crate turns already-extracted syllabus text into a structured
//! list of academic items (assignments, exams, quizzes, ...) with due
//! dates, optional grade weights, and heuristic confidence scores,
//! plus the course metadata found in the document header.
//!
//! The engine is pure and synchronous: it consumes a single string and
//! returns owned data. File decoding, persistence, and calendar export
//! belong to the caller.

pub mod parser;

pub use parser::dates::{DateResolver, EnglishDateResolver, ResolvedDate};
pub use parser::model::{ItemType, ParseResult, ParsedItem};
pub use parser::{ParseError, SyllabusParser};
