//! Parse syllabus command

use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::AsyncReadExt;

use syllaparse_core::{ItemType, ParseResult, SyllabusParser};

use crate::cli::app::ParseArgs;

/// Execute the parse command
pub async fn execute(args: ParseArgs) -> Result<()> {
    let content = match &args.path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let parser = SyllabusParser::new();
    let mut result = parser.parse(&content).context("Failed to parse syllabus")?;

    if let Some(min_confidence) = args.min_confidence {
        result.items.retain(|item| item.confidence >= min_confidence);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_summary(&result, args.show_types);
    Ok(())
}

fn print_summary(result: &ParseResult, show_types: bool) {
    if let Some(name) = &result.course_name {
        println!("Course: {}", name);
    }
    if let Some(instructor) = &result.instructor {
        println!("Instructor: {}", instructor);
    }
    if let (Some(semester), Some(year)) = (&result.semester, result.year) {
        println!("Term: {} {}", semester, year);
    }

    println!("\nFound {} items", result.items.len());

    if show_types && !result.items.is_empty() {
        let mut type_counts: HashMap<ItemType, usize> = HashMap::new();
        for item in &result.items {
            *type_counts.entry(item.item_type).or_insert(0) += 1;
        }

        println!("\nType breakdown:");
        for item_type in ItemType::ALL {
            if let Some(count) = type_counts.get(&item_type) {
                println!("  {}: {}", item_type, count);
            }
        }
    }

    for item in &result.items {
        // The weight unit (percent or points) is dropped at parse time
        let weight = item
            .weight
            .map(|w| format!(" (weight {})", w))
            .unwrap_or_default();
        println!(
            "\n  [{}] {}{}",
            item.item_type,
            item.title,
            weight
        );
        println!("    due {}", item.due_date.format("%Y-%m-%d %H:%M"));
        if let Some(description) = &item.description {
            println!("    {}", description);
        }
        println!("    confidence {:.2}", item.confidence);
    }
}
