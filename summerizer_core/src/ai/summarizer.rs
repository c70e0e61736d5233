use async_trait::async_trait;

use crate::document::dto::Document;
use crate::error::SummerizerError;
use crate::summary::dto::Summary;

/// The external summarization capability the controllers call through.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a whole document, optionally scoped by an instruction.
    async fn summarize(
        &self,
        document: &Document,
        prompt: Option<&str>,
    ) -> Result<Summary, SummerizerError>;

    /// Produce a new summary from `current`, re-scoped by `prompt`.
    async fn refine(&self, current: &Summary, prompt: &str) -> Result<Summary, SummerizerError>;
}
