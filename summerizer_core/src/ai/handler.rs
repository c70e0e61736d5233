use async_trait::async_trait;
use open_ai_rust_responses_by_sshift::types::Tool;
use open_ai_rust_responses_by_sshift::{Client as OAIClient, Model, Request};

use super::prompt::{build_document_prompt, build_refinement_prompt, parse_model_summary};
use super::summarizer::Summarizer;
use super::vector_store::{delete_document_store, upload_document_to_vector_store};
use crate::document::dto::Document;
use crate::document::handler::title_from_file_name;
use crate::error::SummerizerError;
use crate::summary::dto::Summary;

const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Summarizer backed by the OpenAI Responses API.
#[derive(Clone)]
pub struct OpenAiSummarizer {
    openai_client: OAIClient,
}

impl OpenAiSummarizer {
    pub fn new(openai_api_key: &str) -> Result<Self, SummerizerError> {
        let openai_client = OAIClient::new(openai_api_key)
            .map_err(|e| SummerizerError::Config(format!("OpenAI client: {}", e)))?;

        Ok(Self { openai_client })
    }

    async fn ask(&self, input: String, tools: Vec<Tool>) -> Result<String, anyhow::Error> {
        let mut request_builder = Request::builder()
            .model(Model::GPT41Nano)
            .input(input)
            .max_output_tokens(MAX_OUTPUT_TOKENS);

        if !tools.is_empty() {
            request_builder = request_builder.tools(tools);
        }

        let response = self
            .openai_client
            .responses
            .create(request_builder.build())
            .await?;

        if let Some(usage) = &response.usage {
            log::info!("Summarization used {} tokens", usage.total_tokens);
        }

        Ok(response.output_text())
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        document: &Document,
        prompt: Option<&str>,
    ) -> Result<Summary, SummerizerError> {
        log::info!("Summarizing {} with OpenAI", document.name());

        let store = upload_document_to_vector_store(&self.openai_client, document)
            .await
            .map_err(|e| {
                log::error!("Failed to upload {}: {}", document.name(), e);
                SummerizerError::ProcessingFailed(e.to_string())
            })?;

        let answer = self
            .ask(
                build_document_prompt(document.name(), prompt),
                vec![Tool::file_search(vec![store.vector_store_id.clone()])],
            )
            .await;

        delete_document_store(&self.openai_client, &store).await;

        let text = answer.map_err(|e| {
            log::error!("Failed to summarize {}: {}", document.name(), e);
            SummerizerError::ProcessingFailed(e.to_string())
        })?;

        parse_model_summary(&title_from_file_name(document.name()), &text)
    }

    async fn refine(&self, current: &Summary, prompt: &str) -> Result<Summary, SummerizerError> {
        log::info!("Refining '{}' with OpenAI", current.title());

        let text = self
            .ask(build_refinement_prompt(current, prompt), Vec::new())
            .await
            .map_err(|e| {
                log::error!("Failed to refine '{}': {}", current.title(), e);
                SummerizerError::ProcessingFailed(e.to_string())
            })?;

        parse_model_summary(current.title(), &text)
    }
}
