//! Authorization query facade
//!
//! A memoized, render-cycle-stable snapshot of "what can the acting
//! identity do". The snapshot is captured once per context epoch (see
//! [`crate::AuthzContext::query`]); every predicate on it is a cheap
//! lookup with no recomputation.
//!
//! The admin bypass lives here, not in the resolver: `has_permission`,
//! `has_any_permission`, and `has_all_permissions` short-circuit to
//! `true` for a non-impersonating admin. `has_role` and `is_admin` are
//! never bypassed.

use uuid::Uuid;

use sana_rbac::resolver;
use sana_rbac::PermissionSet;

use crate::context::AuthzContext;

/// Immutable authorization snapshot for one context epoch.
///
/// Captures the resolved permission set and role names of the active
/// identity plus the derived `is_admin` / `is_impersonating` flags.
/// Consumers hold it for a render cycle; any two predicates evaluated
/// against the same snapshot are guaranteed consistent.
///
/// # Example
///
/// ```
/// use sana_authz::AuthzContext;
/// use sana_rbac::{Identity, Permission, Role};
/// use uuid::Uuid;
///
/// let mut ctx = AuthzContext::new();
/// ctx.establish_session(
///     Identity::new(Uuid::now_v7())
///         .with_role(Role::named("doctor"))
///         .with_direct_permission(Permission::named("assessment.view")),
/// );
///
/// let query = ctx.query();
/// assert!(query.has_permission("assessment.view"));
/// assert!(query.has_role("doctor"));
/// assert!(!query.is_admin());
/// ```
#[derive(Debug, Clone)]
pub struct AuthzQuery {
    user_id: Option<Uuid>,
    permissions: PermissionSet,
    roles: Vec<String>,
    is_admin: bool,
    is_impersonating: bool,
    epoch: u64,
}

impl AuthzQuery {
    /// Capture a snapshot of the context's current state.
    ///
    /// Resolves the active identity's effective permission set exactly
    /// once; predicates never re-resolve.
    pub(crate) fn capture(ctx: &AuthzContext) -> Self {
        let active = ctx.active_identity();
        Self {
            user_id: active.map(|identity| identity.user_id),
            permissions: resolver::resolve_permissions(active),
            roles: active
                .map(|identity| {
                    identity.roles.iter().map(|role| role.name.clone()).collect()
                })
                .unwrap_or_default(),
            is_admin: ctx.is_admin(),
            is_impersonating: ctx.is_impersonating(),
            epoch: ctx.epoch(),
        }
    }

    /// The acting user's id, if a session is active.
    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Whether the admin bypass applies (admin role, not impersonating).
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Whether the snapshot was captured during impersonation.
    pub fn is_impersonating(&self) -> bool {
        self.is_impersonating
    }

    /// The resolved effective permission set of the active identity.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// The context epoch this snapshot was captured at.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Check a permission by name. Admins (non-impersonating) pass
    /// unconditionally.
    pub fn has_permission(&self, name: &str) -> bool {
        self.is_admin || self.permissions.contains(name)
    }

    /// Check whether at least one of the named permissions is held.
    ///
    /// Empty `names` resolves to `false` for non-admins; the admin
    /// bypass short-circuits before the list is consulted.
    pub fn has_any_permission(&self, names: &[&str]) -> bool {
        self.is_admin || names.iter().any(|name| self.permissions.contains(name))
    }

    /// Check whether every one of the named permissions is held.
    ///
    /// Empty `names` resolves to `true` (vacuous truth).
    pub fn has_all_permissions(&self, names: &[&str]) -> bool {
        self.is_admin || names.iter().all(|name| self.permissions.contains(name))
    }

    /// Check a role by name. Never bypassed: an admin does not "have"
    /// roles they do not carry.
    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles.iter().any(|name| name == role_name)
    }
}
