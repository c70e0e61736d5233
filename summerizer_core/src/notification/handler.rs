use super::dto::{Notification, NotificationVariant};

const TOAST_DURATION_MS: u64 = 5000;

impl Notification {
    fn new(title: &str, description: impl Into<String>, variant: NotificationVariant) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant,
            duration_ms: None,
        }
    }

    fn lasting(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn document_processed() -> Self {
        Self::new(
            "Document processed successfully",
            "Your PDF has been analyzed and summarized.",
            NotificationVariant::Default,
        )
        .lasting(TOAST_DURATION_MS)
    }

    pub fn processing_error() -> Self {
        Self::new(
            "Error processing document",
            "There was a problem analyzing your PDF. Please try again.",
            NotificationVariant::Destructive,
        )
        .lasting(TOAST_DURATION_MS)
    }

    pub fn summary_updated(prompt: &str) -> Self {
        Self::new(
            "Summary updated",
            format!("Summary regenerated with focus on \"{}\".", prompt),
            NotificationVariant::Default,
        )
    }

    pub fn refinement_error() -> Self {
        Self::new(
            "Error updating summary",
            "There was a problem processing your custom prompt. Please try again.",
            NotificationVariant::Destructive,
        )
    }

    pub fn summary_reset() -> Self {
        Self::new(
            "Summary reset",
            "Reverted to the original summary.",
            NotificationVariant::Default,
        )
    }

    pub fn summary_downloaded() -> Self {
        Self::new(
            "Summary downloaded",
            "Your summary has been downloaded as a text file.",
            NotificationVariant::Default,
        )
    }

    pub fn no_summary_found() -> Self {
        Self::new(
            "No summary found",
            "Please upload a PDF first to generate a summary.",
            NotificationVariant::Destructive,
        )
    }
}

/// Queue of pending toasts owned by a single view session.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        log::debug!("Queued notification: {}", notification.title);
        self.pending.push(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
