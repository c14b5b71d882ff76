use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "syllaparse",
    version,
    about = "Syllaparse - Extract assignments and deadlines from syllabus text",
    long_about = "Syllaparse scans plain-text syllabi for academic items (assignments, exams, quizzes, readings) with due dates, grade weights, and confidence scores, plus course metadata from the document header."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse syllabus text
    #[command(about = "Parse a syllabus file (or stdin) into structured items")]
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Path to a plain-text syllabus; reads stdin when omitted
    #[arg(help = "Path to syllabus text file (stdin when omitted)")]
    pub path: Option<PathBuf>,

    /// Emit the full result as JSON instead of a summary
    #[arg(long, help = "Print the parse result as JSON")]
    pub json: bool,

    /// Show item counts grouped by type
    #[arg(long, help = "Display items grouped by type")]
    pub show_types: bool,

    /// Drop items scoring below this confidence
    #[arg(long, help = "Minimum confidence to include an item", value_name = "SCORE")]
    pub min_confidence: Option<f64>,
}
