use std::sync::{Arc, Mutex};

use crate::ai::summarizer::Summarizer;
use crate::document::dto::{Document, SelectedFile};
use crate::error::SummerizerError;
use crate::notification::dto::Notification;
use crate::processing::dto::{ConcurrencyPolicy, ProcessOutcome};
use crate::processing::handler::{lock, ProcessingController};
use crate::summary::dto::{Summary, SummaryHandoff};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not a PDF; nothing changed and nothing was called.
    Ignored,
    Processed(ProcessOutcome),
}

/// The upload control of the intake view: validates the file then hands it to processing.
#[derive(Clone)]
pub struct UploadController {
    processing: ProcessingController,
    selected: Arc<Mutex<Option<SelectedFile>>>,
}

impl UploadController {
    pub fn new(summarizer: Arc<dyn Summarizer>, policy: ConcurrencyPolicy) -> Self {
        Self {
            processing: ProcessingController::new(summarizer, policy),
            selected: Arc::new(Mutex::new(None)),
        }
    }

    pub fn processing(&self) -> &ProcessingController {
        &self.processing
    }

    pub fn is_uploading(&self) -> bool {
        self.processing.is_processing()
    }

    pub fn selected_file(&self) -> Option<SelectedFile> {
        lock(&self.selected).clone()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.processing.summary()
    }

    /// The "how it works" panel only shows before anything was picked or produced.
    pub fn show_how_it_works(&self) -> bool {
        self.selected_file().is_none() && self.summary().is_none()
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.processing.drain_notifications()
    }

    pub fn notify(&self, notification: Notification) {
        self.processing.notify(notification);
    }

    pub async fn submit_document(&self, document: Document) -> Result<SubmitOutcome, SummerizerError> {
        if !document.is_pdf() {
            log::debug!(
                "Ignoring {} with MIME type '{}'",
                document.name(),
                document.mime_type()
            );
            return Ok(SubmitOutcome::Ignored);
        }

        let version = self.processing.admit(&document)?;
        *lock(&self.selected) = Some(document.selected_file());
        let outcome = self.processing.run(version, document).await;

        Ok(SubmitOutcome::Processed(outcome))
    }

    /// Copy of the current summary for the refinement view.
    pub fn handoff(&self) -> SummaryHandoff {
        match self.summary() {
            Some(summary) => SummaryHandoff::from(summary),
            None => SummaryHandoff::default(),
        }
    }

    pub fn abandon(&self) {
        self.processing.abandon();
    }
}
