use async_trait::async_trait;

use crate::error::SummerizerError;
use crate::summary::dto::Summary;

/// Extension point behind the "Share" button.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, summary: &Summary) -> Result<(), SummerizerError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopShare;

#[async_trait]
impl ShareTarget for NoopShare {
    async fn share(&self, summary: &Summary) -> Result<(), SummerizerError> {
        log::debug!("Share requested for '{}'; no share target configured", summary.title());
        Ok(())
    }
}
