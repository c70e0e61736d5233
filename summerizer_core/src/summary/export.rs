//! Flat text download artifact for a [`Summary`].
//!
//! ```text
//! <title>
//!
//! QUICK SUMMARY:
//! 1. <point>
//!
//! DETAILED SUMMARY:
//! Point 1: <point>
//!
//! Generated with Summerizer
//! ```

use super::dto::Summary;
use crate::error::SummerizerError;

pub const DEFAULT_TITLE: &str = "Document Summary";
pub const FOOTER: &str = "Generated with Summerizer";
const QUICK_HEADER: &str = "QUICK SUMMARY:";
const DETAILED_HEADER: &str = "DETAILED SUMMARY:";

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn render_summary_text(summary: &Summary) -> String {
    let title = if summary.title().trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        single_line(summary.title())
    };

    let quick = summary
        .quick_summary()
        .iter()
        .enumerate()
        .map(|(i, point)| format!("{}. {}", i + 1, single_line(point)))
        .collect::<Vec<_>>()
        .join("\n");

    let detailed = summary
        .detailed_summary()
        .iter()
        .enumerate()
        .map(|(i, point)| format!("Point {}: {}", i + 1, single_line(point)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n{}\n{}\n\n{}\n{}\n\n{}\n",
        title, QUICK_HEADER, quick, DETAILED_HEADER, detailed, FOOTER
    )
}

pub fn download_file_name(summary: &Summary) -> String {
    let title = summary.title().trim();
    let stem = if title.is_empty() { "document" } else { title };
    let stem: String = stem
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}-summary.txt", stem)
}

fn strip_number<'a>(line: &'a str, expected: usize) -> Result<&'a str, SummerizerError> {
    let prefix = format!("{}. ", expected);
    line.strip_prefix(&prefix).ok_or_else(|| {
        SummerizerError::InvalidSummary(format!("expected quick point {}, got '{}'", expected, line))
    })
}

fn strip_point<'a>(line: &'a str, expected: usize) -> Result<&'a str, SummerizerError> {
    let prefix = format!("Point {}: ", expected);
    line.strip_prefix(&prefix).ok_or_else(|| {
        SummerizerError::InvalidSummary(format!(
            "expected detailed point {}, got '{}'",
            expected, line
        ))
    })
}

/// Reads an artifact produced by [`render_summary_text`] back by position.
pub fn parse_summary_text(text: &str) -> Result<Summary, SummerizerError> {
    let mut lines = text.lines();

    let title = lines
        .next()
        .ok_or_else(|| SummerizerError::InvalidSummary("empty artifact".to_string()))?
        .to_string();

    let mut quick = Vec::new();
    let mut detailed = Vec::new();
    let mut section = None;

    for line in lines {
        match line {
            "" => continue,
            QUICK_HEADER => section = Some(QUICK_HEADER),
            DETAILED_HEADER => section = Some(DETAILED_HEADER),
            FOOTER => break,
            _ => match section {
                Some(QUICK_HEADER) => {
                    quick.push(strip_number(line, quick.len() + 1)?.to_string());
                }
                Some(_) => {
                    detailed.push(strip_point(line, detailed.len() + 1)?.to_string());
                }
                None => {
                    return Err(SummerizerError::InvalidSummary(format!(
                        "unexpected line before any section: '{}'",
                        line
                    )))
                }
            },
        }
    }

    Summary::new(title, quick, detailed)
}
