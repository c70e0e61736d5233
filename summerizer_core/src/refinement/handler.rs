use std::sync::{Arc, Mutex};

use super::dto::RefineOutcome;
use crate::ai::summarizer::Summarizer;
use crate::error::SummerizerError;
use crate::notification::dto::Notification;
use crate::notification::handler::Notifications;
use crate::processing::handler::{lock, InFlightGuard, Versioned};
use crate::summary::dto::{Summary, SummaryHandoff};
use crate::summary::handler::SummaryState;

pub const DEFAULT_DESCRIPTION: &str = "Key points extracted from your document";

#[derive(Debug)]
struct RefinementState {
    summary: SummaryState,
    summary_id: Option<String>,
    is_processing: bool,
    version: u64,
    notifications: Notifications,
}

impl Versioned for RefinementState {
    fn version(&self) -> u64 {
        self.version
    }

    fn settle_abandoned(&mut self) {
        self.is_processing = false;
    }
}

/// Custom-prompt view: re-scopes the handed-over summary and can revert to it.
#[derive(Clone)]
pub struct RefinementController {
    summarizer: Arc<dyn Summarizer>,
    state: Arc<Mutex<RefinementState>>,
}

impl RefinementController {
    pub fn enter(
        handoff: SummaryHandoff,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<Self, SummerizerError> {
        let Some(summary) = handoff.summary else {
            log::warn!("Refinement view entered without a summary");
            return Err(SummerizerError::NavigationStateMissing);
        };

        Ok(Self {
            summarizer,
            state: Arc::new(Mutex::new(RefinementState {
                summary: SummaryState::new(summary),
                summary_id: handoff.summary_id,
                is_processing: false,
                version: 0,
                notifications: Notifications::default(),
            })),
        })
    }

    pub fn current(&self) -> Summary {
        lock(&self.state).summary.current().clone()
    }

    pub fn original(&self) -> Summary {
        lock(&self.state).summary.original().clone()
    }

    pub fn prompt(&self) -> Option<String> {
        lock(&self.state).summary.prompt().map(str::to_string)
    }

    pub fn summary_id(&self) -> Option<String> {
        lock(&self.state).summary_id.clone()
    }

    pub fn is_processing(&self) -> bool {
        lock(&self.state).is_processing
    }

    pub fn can_generate(&self, prompt: &str) -> bool {
        !prompt.trim().is_empty() && !self.is_processing()
    }

    /// Mirrors the disabled "Reset to Original" button while a refinement runs.
    pub fn can_reset(&self) -> bool {
        !self.is_processing()
    }

    pub fn description(&self) -> String {
        match self.prompt() {
            Some(prompt) => format!("Summary focused on: \"{}\"", prompt),
            None => DEFAULT_DESCRIPTION.to_string(),
        }
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        lock(&self.state).notifications.drain()
    }

    pub fn notify(&self, notification: Notification) {
        lock(&self.state).notifications.push(notification);
    }

    pub fn abandon(&self) {
        let mut state = lock(&self.state);
        state.version += 1;
        state.is_processing = false;
    }

    pub async fn refine(&self, prompt: &str) -> Result<RefineOutcome, SummerizerError> {
        if prompt.trim().is_empty() {
            return Ok(RefineOutcome::Blocked);
        }

        let (version, current) = {
            let mut state = lock(&self.state);
            if state.is_processing {
                return Err(SummerizerError::InFlight);
            }
            state.version += 1;
            state.is_processing = true;
            (state.version, state.summary.current().clone())
        };

        let guard = InFlightGuard::new(&*self.state, version);
        log::info!("Refining '{}' with prompt '{}'", current.title(), prompt);

        let result = self.summarizer.refine(&current, prompt).await;

        let mut state = lock(&self.state);
        if state.version != guard.version() {
            log::info!("Discarding stale refinement (version {})", version);
            guard.disarm();
            return Ok(RefineOutcome::Superseded);
        }
        guard.disarm();
        state.is_processing = false;

        let refined = result.and_then(|summary| {
            current.with_points(
                summary.quick_summary().to_vec(),
                summary.detailed_summary().to_vec(),
            )
        });

        match refined {
            Ok(summary) => {
                state.summary.apply(summary.clone(), prompt);
                state.notifications.push(Notification::summary_updated(prompt));
                Ok(RefineOutcome::Refined(summary))
            }
            Err(e) => {
                log::error!("Error processing custom prompt: {}", e);
                state.notifications.push(Notification::refinement_error());
                Ok(RefineOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Back to the original summary without calling the capability.
    pub fn reset(&self) -> Summary {
        let mut state = lock(&self.state);
        state.version += 1;
        state.is_processing = false;
        let original = state.summary.reset().clone();
        state.notifications.push(Notification::summary_reset());
        original
    }
}
