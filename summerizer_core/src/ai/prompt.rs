use serde::Deserialize;

use crate::error::SummerizerError;
use crate::summary::dto::Summary;

pub const SUMMARY_POINTS: usize = 5;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelSummary {
    quick_summary: Vec<String>,
    detailed_summary: Vec<String>,
}

pub fn build_document_prompt(file_name: &str, instruction: Option<&str>) -> String {
    let focus = match instruction {
        Some(instruction) if !instruction.trim().is_empty() => {
            format!("\n\nFocus the summary on: {}", instruction.trim())
        }
        _ => String::new(),
    };

    format!(
        "You are a document summarizer. Read the attached PDF \"{file_name}\" using file search and return ONLY a JSON object of the form {{\"quickSummary\": [...], \"detailedSummary\": [...]}}.\n\
quickSummary: exactly {n} short one-sentence points.\n\
detailedSummary: exactly {n} paragraphs expanding each point, in the same order.{focus}",
        file_name = file_name,
        n = SUMMARY_POINTS,
        focus = focus
    )
}

pub fn build_refinement_prompt(current: &Summary, instruction: &str) -> String {
    let numbered = |points: &[String]| {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {}", i + 1, p))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are a document summarizer. Rewrite the summary of \"{title}\" following the user's instruction. Return ONLY a JSON object of the form {{\"quickSummary\": [...], \"detailedSummary\": [...]}} with exactly {n} points in each list.\n\n\
Instruction: {instruction}\n\n\
Current quick summary:\n{quick}\n\n\
Current detailed summary:\n{detailed}",
        title = current.title(),
        n = SUMMARY_POINTS,
        instruction = instruction.trim(),
        quick = numbered(current.quick_summary()),
        detailed = numbered(current.detailed_summary()),
    )
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses the model's JSON answer into a [`Summary`] titled `title`.
pub fn parse_model_summary(title: &str, text: &str) -> Result<Summary, SummerizerError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(SummerizerError::ProcessingFailed(
            "Generated summary is empty".to_string(),
        ));
    }

    let parsed: ModelSummary = serde_json::from_str(body)
        .map_err(|e| SummerizerError::ProcessingFailed(format!("malformed summary: {}", e)))?;

    let clean = |points: Vec<String>| {
        points
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
    };

    Summary::new(
        title,
        clean(parsed.quick_summary),
        clean(parsed.detailed_summary),
    )
    .map_err(|e| SummerizerError::ProcessingFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_document_prompt() {
        let prompt = build_document_prompt("invoice.pdf", None);
        assert!(prompt.contains("\"invoice.pdf\""));
        assert!(prompt.contains("exactly 5"));
        assert!(!prompt.contains("Focus the summary on"));

        let focused = build_document_prompt("invoice.pdf", Some("  totals  "));
        assert!(focused.ends_with("Focus the summary on: totals"));
    }

    #[test]
    fn test_build_refinement_prompt() {
        let current = Summary::new("report", vec!["a".into()], vec!["b".into()]).unwrap();
        let prompt = build_refinement_prompt(&current, "Extract action items");
        assert!(prompt.contains("Instruction: Extract action items"));
        assert!(prompt.contains("Current quick summary:\n1. a"));
        assert!(prompt.contains("Current detailed summary:\n1. b"));
    }

    #[test]
    fn test_parse_model_summary_with_fence() {
        let text = "```json\n{\"quickSummary\": [\" one \", \"\"], \"detailedSummary\": [\"two\"]}\n```";
        let summary = parse_model_summary("report", text).unwrap();
        assert_eq!(summary.title(), "report");
        assert_eq!(summary.quick_summary(), ["one".to_string()]);
        assert_eq!(summary.detailed_summary(), ["two".to_string()]);
    }

    #[test]
    fn test_parse_model_summary_rejects_bad_output() {
        assert!(parse_model_summary("r", "   ").is_err());
        assert!(parse_model_summary("r", "not json").is_err());
        assert!(matches!(
            parse_model_summary("r", "{\"quickSummary\": [], \"detailedSummary\": [\"x\"]}"),
            Err(SummerizerError::ProcessingFailed(_))
        ));
    }
}
