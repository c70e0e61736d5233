use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::dto::{ConcurrencyPolicy, ProcessOutcome, ProcessingStatus};
use crate::ai::summarizer::Summarizer;
use crate::document::dto::Document;
use crate::error::SummerizerError;
use crate::notification::dto::Notification;
use crate::notification::handler::Notifications;
use crate::summary::dto::Summary;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State that tags each async call with the version it was issued against.
pub(crate) trait Versioned {
    fn version(&self) -> u64;

    /// Called when an in-flight call is dropped before it resolved.
    fn settle_abandoned(&mut self);
}

/// Returns the owner to a ready state if the pending future is dropped (navigation away).
pub(crate) struct InFlightGuard<'a, S: Versioned> {
    state: &'a Mutex<S>,
    version: u64,
    armed: bool,
}

impl<'a, S: Versioned> InFlightGuard<'a, S> {
    pub(crate) fn new(state: &'a Mutex<S>, version: u64) -> Self {
        Self {
            state,
            version,
            armed: true,
        }
    }

    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: Versioned> Drop for InFlightGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock(self.state);
        if state.version() == self.version {
            log::debug!("In-flight call {} dropped before resolving", self.version);
            state.settle_abandoned();
        }
    }
}

#[derive(Debug)]
struct ProcessingState {
    status: ProcessingStatus,
    version: u64,
    summary: Option<Summary>,
    notifications: Notifications,
}

impl Versioned for ProcessingState {
    fn version(&self) -> u64 {
        self.version
    }

    fn settle_abandoned(&mut self) {
        self.status = ProcessingStatus::Idle;
    }
}

/// Owns the document-to-summary call and its loading flag for one view session.
#[derive(Clone)]
pub struct ProcessingController {
    summarizer: Arc<dyn Summarizer>,
    policy: ConcurrencyPolicy,
    state: Arc<Mutex<ProcessingState>>,
}

impl ProcessingController {
    pub fn new(summarizer: Arc<dyn Summarizer>, policy: ConcurrencyPolicy) -> Self {
        Self {
            summarizer,
            policy,
            state: Arc::new(Mutex::new(ProcessingState {
                status: ProcessingStatus::Idle,
                version: 0,
                summary: None,
                notifications: Notifications::default(),
            })),
        }
    }

    pub fn status(&self) -> ProcessingStatus {
        lock(&self.state).status
    }

    pub fn is_processing(&self) -> bool {
        self.status() == ProcessingStatus::Processing
    }

    pub fn summary(&self) -> Option<Summary> {
        lock(&self.state).summary.clone()
    }

    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        lock(&self.state).notifications.drain()
    }

    pub fn notify(&self, notification: Notification) {
        lock(&self.state).notifications.push(notification);
    }

    /// Discard any pending result and go back to `Idle`.
    pub fn abandon(&self) {
        let mut state = lock(&self.state);
        state.version += 1;
        state.status = ProcessingStatus::Idle;
        log::info!("Processing abandoned at version {}", state.version);
    }

    pub async fn process(&self, document: Document) -> Result<ProcessOutcome, SummerizerError> {
        let version = self.admit(&document)?;
        Ok(self.run(version, document).await)
    }

    /// Claims the controller for `document`; nothing is touched when the call is refused.
    pub(crate) fn admit(&self, document: &Document) -> Result<u64, SummerizerError> {
        let mut state = lock(&self.state);
        if state.status == ProcessingStatus::Processing
            && self.policy == ConcurrencyPolicy::RejectWhileInFlight
        {
            log::warn!("Rejected {}: a document is already processing", document.name());
            return Err(SummerizerError::InFlight);
        }
        state.version += 1;
        state.status = ProcessingStatus::Processing;
        Ok(state.version)
    }

    /// Runs an admitted call to completion.
    pub(crate) async fn run(&self, version: u64, document: Document) -> ProcessOutcome {
        let guard = InFlightGuard::new(&*self.state, version);
        log::info!("Processing {} (version {})", document.name(), version);

        let result = self.summarizer.summarize(&document, None).await;

        let mut state = lock(&self.state);
        if state.version != guard.version() {
            log::info!(
                "Discarding stale result for {} (version {}, current {})",
                document.name(),
                version,
                state.version
            );
            guard.disarm();
            return ProcessOutcome::Superseded;
        }
        guard.disarm();

        match result {
            Ok(summary) => {
                state.status = ProcessingStatus::Succeeded;
                state.summary = Some(summary.clone());
                state.notifications.push(Notification::document_processed());
                log::info!("Processed {} into '{}'", document.name(), summary.title());
                ProcessOutcome::Completed(summary)
            }
            Err(e) => {
                log::error!("Error processing file {}: {}", document.name(), e);
                state.status = ProcessingStatus::Failed;
                state.notifications.push(Notification::processing_error());
                ProcessOutcome::Failed(e.to_string())
            }
        }
    }
}
