use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use summerizer_core::{
    ai::summarizer::Summarizer,
    auth::handler::RevokedTokens,
    error::SummerizerError,
    helpers::{config::DEFAULT_SESSION_TTL, jwt::JwtManager},
    intake::handler::UploadController,
    processing::dto::ConcurrencyPolicy,
    refinement::handler::RefinementController,
    viewer::share::{NoopShare, ShareTarget},
};
use tokio::{task::JoinHandle, time::Instant};
use uuid::Uuid;

pub const SWEEP_PERIOD: Duration = Duration::from_secs(60);

struct Session<C> {
    controller: C,
    touched: Instant,
}

impl<C: Clone> Session<C> {
    fn new(controller: C) -> Self {
        Self {
            controller,
            touched: Instant::now(),
        }
    }

    fn touch(&mut self) -> C {
        self.touched = Instant::now();
        self.controller.clone()
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.touched)
    }
}

/// View sessions live here; each one is owned by exactly one client.
#[derive(Clone)]
pub struct ServerState {
    summarizer: Arc<dyn Summarizer>,
    policy: ConcurrencyPolicy,
    jwt: JwtManager,
    revoked: RevokedTokens,
    share: Arc<dyn ShareTarget>,
    session_ttl: Duration,
    intakes: Arc<DashMap<Uuid, Session<UploadController>>>,
    refinements: Arc<DashMap<Uuid, Session<RefinementController>>>,
}

impl From<(Arc<dyn Summarizer>, ConcurrencyPolicy, JwtManager)> for ServerState {
    fn from(states: (Arc<dyn Summarizer>, ConcurrencyPolicy, JwtManager)) -> Self {
        let (summarizer, policy, jwt) = states;
        Self {
            summarizer,
            policy,
            jwt,
            revoked: RevokedTokens::default(),
            share: Arc::new(NoopShare),
            session_ttl: DEFAULT_SESSION_TTL,
            intakes: Arc::new(DashMap::new()),
            refinements: Arc::new(DashMap::new()),
        }
    }
}

impl ServerState {
    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    pub fn summarizer(&self) -> Arc<dyn Summarizer> {
        self.summarizer.clone()
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    pub fn revoked(&self) -> &RevokedTokens {
        &self.revoked
    }

    pub fn share(&self) -> Arc<dyn ShareTarget> {
        self.share.clone()
    }

    pub fn open_intake(&self) -> (Uuid, UploadController) {
        let id = Uuid::new_v4();
        let controller = UploadController::new(self.summarizer(), self.policy);
        self.intakes.insert(id, Session::new(controller.clone()));
        log::info!("Opened intake session {}", id);
        (id, controller)
    }

    pub fn intake(&self, id: Uuid) -> Result<UploadController, SummerizerError> {
        self.intakes
            .get_mut(&id)
            .map(|mut entry| entry.touch())
            .ok_or_else(|| SummerizerError::SessionNotFound(id.to_string()))
    }

    pub fn close_intake(&self, id: Uuid) -> Result<(), SummerizerError> {
        let (_, session) = self
            .intakes
            .remove(&id)
            .ok_or_else(|| SummerizerError::SessionNotFound(id.to_string()))?;
        session.controller.abandon();
        log::info!("Closed intake session {}", id);
        Ok(())
    }

    pub fn open_refinement(&self, controller: RefinementController) -> Uuid {
        let id = Uuid::new_v4();
        self.refinements.insert(id, Session::new(controller));
        log::info!("Opened refinement session {}", id);
        id
    }

    pub fn refinement(&self, id: Uuid) -> Result<RefinementController, SummerizerError> {
        self.refinements
            .get_mut(&id)
            .map(|mut entry| entry.touch())
            .ok_or_else(|| SummerizerError::SessionNotFound(id.to_string()))
    }

    pub fn close_refinement(&self, id: Uuid) -> Result<(), SummerizerError> {
        let (_, session) = self
            .refinements
            .remove(&id)
            .ok_or_else(|| SummerizerError::SessionNotFound(id.to_string()))?;
        session.controller.abandon();
        log::info!("Closed refinement session {}", id);
        Ok(())
    }

    /// Drops sessions idle for longer than the TTL and revocations of expired tokens.
    /// A session with a call in flight is kept until the call settles.
    pub fn sweep(&self) {
        let now = Instant::now();
        let ttl = self.session_ttl;

        self.intakes.retain(|id, session| {
            if session.idle_for(now) < ttl || session.controller.is_uploading() {
                return true;
            }
            session.controller.abandon();
            log::info!("Expired intake session {}", id);
            false
        });

        self.refinements.retain(|id, session| {
            if session.idle_for(now) < ttl || session.controller.is_processing() {
                return true;
            }
            session.controller.abandon();
            log::info!("Expired refinement session {}", id);
            false
        });

        let pruned = self.revoked.prune_expired();
        if pruned > 0 {
            log::debug!("Pruned {} expired revocations", pruned);
        }
    }
}

/// Runs `sweep` every `period` for as long as the runtime lives.
pub fn spawn_sweeper(state: Arc<ServerState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            state.sweep();
        }
    })
}

#[cfg(test)]
mod tests {
    use summerizer_core::{
        ai::mock::MockSummarizer,
        document::dto::{Document, PDF_MIME_TYPE},
    };

    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    fn test_state() -> ServerState {
        ServerState::from((
            Arc::new(MockSummarizer::instant()) as Arc<dyn Summarizer>,
            ConcurrencyPolicy::Supersede,
            JwtManager::new("test-secret"),
        ))
        .with_session_ttl(TTL)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_drops_idle_sessions() {
        let state = test_state();
        let (idle, _) = state.open_intake();
        let (active, _) = state.open_intake();

        tokio::time::advance(TTL / 2).await;
        state.intake(active).unwrap();
        tokio::time::advance(TTL / 2 + Duration::from_secs(1)).await;
        state.sweep();

        assert!(matches!(
            state.intake(idle),
            Err(SummerizerError::SessionNotFound(_))
        ));
        assert!(state.intake(active).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_expires_both_session_kinds() {
        let state = Arc::new(test_state());
        let (intake_id, intake) = state.open_intake();
        intake
            .submit_document(Document::new("a.pdf", PDF_MIME_TYPE, vec![1u8; 16]))
            .await
            .unwrap();
        let controller = RefinementController::enter(intake.handoff(), state.summarizer()).unwrap();
        let refinement_id = state.open_refinement(controller);

        let sweeper = spawn_sweeper(state.clone(), SWEEP_PERIOD);
        tokio::time::sleep(TTL + SWEEP_PERIOD * 2).await;

        assert!(state.intake(intake_id).is_err());
        assert!(state.refinement(refinement_id).is_err());
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_prunes_expired_revocations() {
        let state = test_state();
        state.revoked().revoke("expired", 0);
        state.revoked().revoke("live", i64::MAX);

        state.sweep();

        assert!(!state.revoked().is_revoked("expired"));
        assert!(state.revoked().is_revoked("live"));
    }
}
