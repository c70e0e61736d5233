use std::time::Duration;

use async_trait::async_trait;

use super::summarizer::Summarizer;
use crate::document::dto::Document;
use crate::document::handler::title_from_file_name;
use crate::error::SummerizerError;
use crate::summary::dto::Summary;

pub const DEFAULT_PROCESS_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_REFINE_DELAY: Duration = Duration::from_millis(2000);

const QUICK_SUMMARY: [&str; 5] = [
    "The document discusses key financial projections for Q3 2023.",
    "Revenue is expected to increase by 15% compared to previous quarter.",
    "New product line launch scheduled for August 2023.",
    "Market expansion into European territories planned for September.",
    "Budget allocations have been adjusted to accommodate marketing campaigns.",
];

const DETAILED_SUMMARY: [&str; 5] = [
    "Financial projections for Q3 2023 indicate a strong growth trajectory with revenue expected to increase by 15% compared to Q2. This growth is primarily driven by the expansion of the core product line and increased customer retention rates.",
    "The new product line, codenamed 'Phoenix', is scheduled for launch in August 2023. Initial production runs have been completed and marketing materials are in final review. Pre-orders have exceeded expectations by 30%.",
    "Market expansion into European territories, specifically Germany, France, and Spain, is planned for September 2023. Local teams have been established and regulatory compliance is on track. Distribution partnerships have been secured in all target markets.",
    "Budget allocations for Q3 have been adjusted to accommodate increased marketing campaigns associated with both the new product launch and European expansion. The marketing budget has been increased by 25% while R&D has been temporarily reduced by 10%.",
    "Customer feedback from beta testing of the new product line has been overwhelmingly positive, with a satisfaction rating of 4.8/5. Key improvements based on feedback have been incorporated into the final product design.",
];

const REFINED_QUICK_SUMMARY: [&str; 4] = [
    "The financial implications show a positive ROI within 6 months.",
    "Initial investment is offset by projected revenue increase of 15%.",
    "Cost reduction measures will save approximately $250,000 annually.",
    "Risk assessment indicates low financial exposure with high potential gains.",
];

const REFINED_DETAILED_SUMMARY: [&str; 4] = [
    "The projected revenue increase of 15% translates to approximately $3.4M in additional annual revenue, based on current market conditions and conservative growth estimates.",
    "Cost reduction measures implemented alongside the new systems will result in operational savings of approximately $250,000 annually, primarily from automation of manual processes and reduced error rates.",
    "The risk assessment conducted by the financial team indicates low financial exposure with high potential gains. The worst-case scenario projects breaking even within 12 months, while the best-case scenario shows returns beginning as early as 4 months post-implementation.",
    "Stakeholder financial interests are protected through phased implementation, allowing for assessment and adjustment at key milestones. This approach minimizes financial risk while maintaining the projected benefits timeline.",
];

fn owned(points: &[&str]) -> Vec<String> {
    points.iter().map(|p| p.to_string()).collect()
}

/// Fixed-delay summarizer returning canned content. Titles come from the file name only.
#[derive(Debug, Clone)]
pub struct MockSummarizer {
    process_delay: Duration,
    refine_delay: Duration,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESS_DELAY, DEFAULT_REFINE_DELAY)
    }
}

impl MockSummarizer {
    pub fn new(process_delay: Duration, refine_delay: Duration) -> Self {
        Self {
            process_delay,
            refine_delay,
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn canned_summary(document_name: &str) -> Result<Summary, SummerizerError> {
        Summary::new(
            title_from_file_name(document_name),
            owned(&QUICK_SUMMARY),
            owned(&DETAILED_SUMMARY),
        )
    }

    fn refined_points(prompt: &str) -> (Vec<String>, Vec<String>) {
        let mut quick = vec![format!("Based on your prompt \"{}\":", prompt)];
        quick.extend(owned(&REFINED_QUICK_SUMMARY));

        let mut detailed = vec![format!(
            "As requested in your prompt \"{}\", the financial analysis shows: The initial investment of $1.2M is expected to yield returns within the first 6 months of implementation. This is based on projected revenue increases and cost savings.",
            prompt
        )];
        detailed.extend(owned(&REFINED_DETAILED_SUMMARY));

        (quick, detailed)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        document: &Document,
        prompt: Option<&str>,
    ) -> Result<Summary, SummerizerError> {
        log::info!(
            "Mock summarizing {} ({} bytes) after {:?}",
            document.name(),
            document.size(),
            self.process_delay
        );
        tokio::time::sleep(self.process_delay).await;

        let summary = Self::canned_summary(document.name())?;
        match prompt {
            Some(prompt) if !prompt.trim().is_empty() => {
                let (quick, detailed) = Self::refined_points(prompt.trim());
                summary.with_points(quick, detailed)
            }
            _ => Ok(summary),
        }
    }

    async fn refine(&self, current: &Summary, prompt: &str) -> Result<Summary, SummerizerError> {
        log::info!(
            "Mock refining '{}' with prompt '{}' after {:?}",
            current.title(),
            prompt,
            self.refine_delay
        );
        tokio::time::sleep(self.refine_delay).await;

        let (quick, detailed) = Self::refined_points(prompt);
        current.with_points(quick, detailed)
    }
}
