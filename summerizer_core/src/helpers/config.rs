use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::handler::OpenAiSummarizer;
use crate::ai::mock::{MockSummarizer, DEFAULT_PROCESS_DELAY, DEFAULT_REFINE_DELAY};
use crate::ai::summarizer::Summarizer;
use crate::error::SummerizerError;
use crate::processing::dto::ConcurrencyPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizerBackend {
    Mock {
        process_delay: Duration,
        refine_delay: Duration,
    },
    OpenAi {
        api_key: String,
    },
}

/// Sessions untouched for this long are dropped by the server sweeper.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummerizerConfig {
    pub backend: SummarizerBackend,
    pub policy: ConcurrencyPolicy,
    pub session_ttl: Duration,
}

fn delay_from_env(key: &str, default: Duration) -> Result<Duration, SummerizerError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| SummerizerError::Config(format!("{} must be milliseconds: {}", key, e))),
        Err(_) => Ok(default),
    }
}

impl SummerizerConfig {
    pub fn from_env() -> Result<Self, SummerizerError> {
        let backend = env::var("SUMMARIZER_BACKEND").unwrap_or_else(|_| "mock".to_string());

        let backend = match backend.trim().to_ascii_lowercase().as_str() {
            "mock" => SummarizerBackend::Mock {
                process_delay: delay_from_env("PROCESS_DELAY_MS", DEFAULT_PROCESS_DELAY)?,
                refine_delay: delay_from_env("REFINE_DELAY_MS", DEFAULT_REFINE_DELAY)?,
            },
            "openai" => SummarizerBackend::OpenAi {
                api_key: env::var("OPENAI_API_KEY").map_err(|_| {
                    SummerizerError::Config("OPENAI_API_KEY not set".to_string())
                })?,
            },
            other => {
                return Err(SummerizerError::Config(format!(
                    "unknown SUMMARIZER_BACKEND '{}'",
                    other
                )))
            }
        };

        let policy = match env::var("CONCURRENCY_POLICY") {
            Ok(value) => value
                .parse::<ConcurrencyPolicy>()
                .map_err(SummerizerError::Config)?,
            Err(_) => ConcurrencyPolicy::default(),
        };

        let session_ttl = match env::var("SESSION_TTL_SECS") {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(SummerizerError::Config(format!(
                        "SESSION_TTL_SECS must be a positive number of seconds, got '{}'",
                        value
                    )))
                }
            },
            Err(_) => DEFAULT_SESSION_TTL,
        };

        Ok(Self {
            backend,
            policy,
            session_ttl,
        })
    }

    pub fn build_summarizer(&self) -> Result<Arc<dyn Summarizer>, SummerizerError> {
        let summarizer: Arc<dyn Summarizer> = match &self.backend {
            SummarizerBackend::Mock {
                process_delay,
                refine_delay,
            } => {
                log::info!(
                    "Using mock summarizer ({:?} processing, {:?} refinement)",
                    process_delay,
                    refine_delay
                );
                Arc::new(MockSummarizer::new(*process_delay, *refine_delay))
            }
            SummarizerBackend::OpenAi { api_key } => {
                log::info!("Using OpenAI summarizer");
                Arc::new(OpenAiSummarizer::new(api_key)?)
            }
        };

        Ok(summarizer)
    }
}
