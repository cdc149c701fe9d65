//! Authorization context
//!
//! Session-scoped authorization state: the real authenticated identity,
//! an optional impersonated identity, and the transitions between them.
//! This is the single state owner - every mutation goes through `&mut
//! self` methods here, so no two writers can race, and reads observe
//! whole-identity replacements only (never partial mutation).

use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

use sana_rbac::resolver;
use sana_rbac::Identity;

use crate::error::{AuthzError, AuthzResult};
use crate::query::AuthzQuery;

/// Session-scoped authorization state with impersonation support.
///
/// Two states: **Normal** (no impersonated identity) and
/// **Impersonating**. The *active identity* - the one every
/// authorization check evaluates against - is the impersonated identity
/// when present, else the real one. Starting or stopping impersonation
/// never touches the real identity.
///
/// Identity snapshots are replaced wholesale (session refresh, start
/// impersonation) and every replacement bumps an internal epoch that
/// invalidates the memoized [`AuthzQuery`] on the next read.
///
/// # Example
///
/// ```
/// use sana_authz::AuthzContext;
/// use sana_rbac::{Identity, Role};
/// use uuid::Uuid;
///
/// let mut ctx = AuthzContext::new();
/// ctx.establish_session(Identity::new(Uuid::now_v7()).with_role(Role::named("admin")));
///
/// assert!(ctx.is_admin());
/// assert!(!ctx.is_impersonating());
/// ```
#[derive(Debug, Default)]
pub struct AuthzContext {
    /// The authenticated identity. Never cleared by impersonation.
    real: Option<Identity>,

    /// The impersonated identity, present only during impersonation.
    impersonated: Option<Identity>,

    /// When the current impersonation started, for audit display.
    impersonation_started_at: Option<DateTime<Utc>>,

    /// Bumped on every state mutation; keys the query memo.
    epoch: u64,

    /// Memoized query snapshot for the current epoch.
    memo: RwLock<Option<Arc<AuthzQuery>>>,
}

impl AuthzContext {
    /// Create an empty (logged-out) context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the real authenticated identity.
    ///
    /// Called at session establishment and on every profile refresh.
    /// The identity is replaced wholesale; an active impersonation is
    /// left in place (the refreshed real identity sits beneath it).
    pub fn establish_session(&mut self, identity: Identity) {
        tracing::debug!(user_id = %identity.user_id, "session identity replaced");
        self.real = Some(identity);
        self.bump_epoch();
    }

    /// Tear down the session (logout). Clears both identities.
    pub fn clear_session(&mut self) {
        self.real = None;
        self.impersonated = None;
        self.impersonation_started_at = None;
        self.bump_epoch();
    }

    /// Begin impersonating another user.
    ///
    /// The backend authorizes the impersonation call itself; this method
    /// only stores the resulting identity. Starting while already
    /// impersonating replaces the impersonated identity (no nesting);
    /// the real identity is unaffected either way.
    ///
    /// # Errors
    ///
    /// * [`AuthzError::NoActiveSession`] - no real identity is present
    /// * [`AuthzError::InvalidImpersonationTarget`] - target carries a
    ///   nil user id
    ///
    /// On error no state changes.
    pub fn start_impersonating(&mut self, target: Identity) -> AuthzResult<()> {
        let Some(real) = &self.real else {
            return Err(AuthzError::NoActiveSession);
        };
        if target.user_id.is_nil() {
            return Err(AuthzError::InvalidImpersonationTarget(
                "nil user id".to_string(),
            ));
        }

        tracing::info!(
            actor = %real.user_id,
            subject = %target.user_id,
            "impersonation started"
        );
        self.impersonated = Some(target);
        self.impersonation_started_at = Some(Utc::now());
        self.bump_epoch();
        Ok(())
    }

    /// Stop impersonating and return to the real identity.
    ///
    /// Idempotent: calling while not impersonating is a no-op, never an
    /// error.
    pub fn stop_impersonating(&mut self) {
        if let Some(subject) = self.impersonated.take() {
            tracing::info!(subject = %subject.user_id, "impersonation stopped");
            self.impersonation_started_at = None;
            self.bump_epoch();
        }
    }

    /// The identity every authorization check evaluates against:
    /// the impersonated identity when present, else the real one.
    pub fn active_identity(&self) -> Option<&Identity> {
        self.impersonated.as_ref().or(self.real.as_ref())
    }

    /// The authenticated identity, regardless of impersonation.
    pub fn real_identity(&self) -> Option<&Identity> {
        self.real.as_ref()
    }

    /// The impersonated identity, when impersonation is active.
    pub fn impersonated_identity(&self) -> Option<&Identity> {
        self.impersonated.as_ref()
    }

    /// When the current impersonation started.
    pub fn impersonation_started_at(&self) -> Option<DateTime<Utc>> {
        self.impersonation_started_at
    }

    /// Whether an impersonation session is active.
    pub fn is_impersonating(&self) -> bool {
        self.impersonated.is_some()
    }

    /// Whether the admin bypass applies.
    ///
    /// True iff the active identity carries the `"admin"` role AND no
    /// impersonation is active. An admin impersonating another user is
    /// evaluated strictly under that user's own grants.
    pub fn is_admin(&self) -> bool {
        !self.is_impersonating() && resolver::is_admin_identity(self.active_identity())
    }

    /// Current state epoch. Bumped on every mutation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Get the memoized query snapshot for the current state.
    ///
    /// The snapshot resolves the active identity's permission set once;
    /// repeated calls within the same epoch return the same `Arc`
    /// without recomputation. Any mutation (session replacement,
    /// impersonation start/stop, logout) invalidates the memo on the
    /// next read.
    pub fn query(&self) -> Arc<AuthzQuery> {
        {
            let memo = self.memo.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = memo.as_ref() {
                if snapshot.epoch() == self.epoch {
                    return Arc::clone(snapshot);
                }
            }
        }

        let snapshot = Arc::new(AuthzQuery::capture(self));
        let mut memo = self.memo.write().unwrap_or_else(PoisonError::into_inner);
        *memo = Some(Arc::clone(&snapshot));
        snapshot
    }

    fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}
