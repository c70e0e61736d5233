use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use super::dto::HeaderAction;
use crate::helpers::dto::User;
use crate::helpers::jwt::JwtManager;

/// External auth/session capability. Views only look at whether a user is present.
pub trait AuthProvider {
    fn current_user(&self) -> Option<User>;

    fn sign_out(&self);
}

impl HeaderAction {
    pub fn for_intake(user: Option<&User>) -> Self {
        match user {
            Some(_) => HeaderAction::SignOut,
            None => HeaderAction::SignIn,
        }
    }

    pub fn for_refinement(user: Option<&User>) -> Self {
        match user {
            Some(_) => HeaderAction::Dashboard,
            None => HeaderAction::SignIn,
        }
    }
}

/// Tokens that were signed out before they expired, keyed to their `exp`.
#[derive(Clone, Default)]
pub struct RevokedTokens {
    tokens: Arc<DashMap<String, i64>>,
}

impl RevokedTokens {
    pub fn revoke(&self, token: &str, exp: i64) {
        self.tokens.insert(token.to_string(), exp);
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops entries whose token expired at or before `now` (unix seconds).
    /// Such tokens fail validation anyway.
    pub fn prune(&self, now: i64) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, exp| *exp > now);
        before.saturating_sub(self.tokens.len())
    }

    pub fn prune_expired(&self) -> usize {
        self.prune(Utc::now().timestamp())
    }
}

/// Session resolved from an optional bearer token.
#[derive(Clone)]
pub struct TokenSession {
    jwt: JwtManager,
    revoked: RevokedTokens,
    token: Option<String>,
}

impl TokenSession {
    pub fn new(jwt: JwtManager, revoked: RevokedTokens, token: Option<String>) -> Self {
        Self {
            jwt,
            revoked,
            token,
        }
    }

    /// Accepts a raw `Authorization` header value.
    pub fn from_header(jwt: JwtManager, revoked: RevokedTokens, header: Option<&str>) -> Self {
        let token = header
            .map(|h| h.trim_start_matches("Bearer ").trim().to_string())
            .filter(|t| !t.is_empty());
        Self::new(jwt, revoked, token)
    }
}

impl AuthProvider for TokenSession {
    fn current_user(&self) -> Option<User> {
        let token = self.token.as_deref()?;
        if self.revoked.is_revoked(token) {
            return None;
        }
        match self.jwt.validate_token(token) {
            Ok(claims) => Some(User::from(claims)),
            Err(e) => {
                log::debug!("Ignoring invalid session token: {}", e);
                None
            }
        }
    }

    fn sign_out(&self) {
        let Some(token) = self.token.as_deref() else {
            return;
        };
        match self.jwt.validate_token(token) {
            Ok(claims) => {
                self.revoked.revoke(token, claims.exp);
                log::info!("Session signed out");
            }
            Err(e) => log::debug!("Nothing to revoke for an invalid token: {}", e),
        }
    }
}
