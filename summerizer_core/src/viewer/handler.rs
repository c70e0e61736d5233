use super::dto::{DetailedPoint, DownloadArtifact, LoadingView, QuickPoint, SummaryView};
use crate::summary::dto::Summary;
use crate::summary::export::{download_file_name, render_summary_text, DEFAULT_TITLE};

pub const TEXT_CONTENT_TYPE: &str = "text/plain";

impl SummaryView {
    pub fn project(summary: &Summary, description: impl Into<String>) -> Self {
        let title = if summary.title().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            summary.title().to_string()
        };

        Self {
            title,
            description: description.into(),
            quick_summary: summary
                .quick_summary()
                .iter()
                .enumerate()
                .map(|(i, text)| QuickPoint {
                    number: i + 1,
                    text: text.clone(),
                })
                .collect(),
            detailed_summary: summary
                .detailed_summary()
                .iter()
                .enumerate()
                .map(|(i, text)| DetailedPoint {
                    heading: format!("Point {}", i + 1),
                    text: text.clone(),
                })
                .collect(),
        }
    }
}

impl Default for LoadingView {
    fn default() -> Self {
        Self {
            title: "Analyzing document...".to_string(),
            description: "Please wait while we process your document".to_string(),
            message: "Extracting insights from your document...".to_string(),
        }
    }
}

pub fn download(summary: &Summary) -> DownloadArtifact {
    DownloadArtifact {
        file_name: download_file_name(summary),
        content_type: TEXT_CONTENT_TYPE.to_string(),
        content: render_summary_text(summary),
    }
}
