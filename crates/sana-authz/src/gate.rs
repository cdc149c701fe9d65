//! UI gating
//!
//! A declarative show/hide decision for protected content. Dashboards
//! declare gates as data (on nav items, route tables, widget manifests)
//! and evaluate them against the current [`AuthzQuery`] snapshot.

use serde::{Deserialize, Serialize};

use crate::query::AuthzQuery;

/// A declarative visibility constraint for protected UI.
///
/// Exactly one mode applies, checked in precedence order:
/// 1. `role` - visible iff the active identity holds the role
/// 2. `permission` - visible iff the single permission is held
/// 3. `permissions` - visible iff any (or, with `require_all`, every)
///    listed permission is held
/// 4. none set - no constraint, always visible
///
/// A non-impersonating admin passes every mode unconditionally. An
/// empty `permissions` list is treated as unset (a deserialized gate
/// cannot distinguish absent from empty).
///
/// # Example
///
/// ```
/// use sana_authz::{AuthzContext, Gate};
/// use sana_rbac::{Identity, Permission, Role};
/// use uuid::Uuid;
///
/// let mut ctx = AuthzContext::new();
/// ctx.establish_session(
///     Identity::new(Uuid::now_v7())
///         .with_role(Role::named("doctor"))
///         .with_direct_permission(Permission::named("assessment.view")),
/// );
/// let query = ctx.query();
///
/// assert!(Gate::permission("assessment.view").is_visible(&query));
/// assert!(Gate::role("doctor").is_visible(&query));
/// assert!(!Gate::role("admin").is_visible(&query));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Required role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Required single permission name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    /// Required permission names (any-of by default).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    /// When set, `permissions` requires every entry instead of any.
    #[serde(default)]
    pub require_all: bool,
}

impl Gate {
    /// A gate with no constraint: always visible.
    pub fn open() -> Self {
        Self::default()
    }

    /// Gate on a role.
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            role: Some(name.into()),
            ..Self::default()
        }
    }

    /// Gate on a single permission.
    pub fn permission(name: impl Into<String>) -> Self {
        Self {
            permission: Some(name.into()),
            ..Self::default()
        }
    }

    /// Gate on holding at least one of the named permissions.
    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: names.into_iter().map(Into::into).collect(),
            require_all: false,
            ..Self::default()
        }
    }

    /// Gate on holding every one of the named permissions.
    pub fn all_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: names.into_iter().map(Into::into).collect(),
            require_all: true,
            ..Self::default()
        }
    }

    /// Decide whether gated content is visible under the given snapshot.
    pub fn is_visible(&self, query: &AuthzQuery) -> bool {
        if query.is_admin() {
            return true;
        }

        if let Some(role) = &self.role {
            return query.has_role(role);
        }
        if let Some(permission) = &self.permission {
            return query.has_permission(permission);
        }
        if !self.permissions.is_empty() {
            let names: Vec<&str> = self.permissions.iter().map(String::as_str).collect();
            return if self.require_all {
                query.has_all_permissions(&names)
            } else {
                query.has_any_permission(&names)
            };
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthzContext;
    use sana_rbac::{Identity, Permission, Role};
    use uuid::Uuid;

    fn doctor_ctx() -> AuthzContext {
        let mut ctx = AuthzContext::new();
        ctx.establish_session(
            Identity::new(Uuid::now_v7())
                .with_role(Role::named("doctor"))
                .with_direct_permission(Permission::named("assessment.view"))
                .with_direct_permission(Permission::named("patient.read")),
        );
        ctx
    }

    fn admin_ctx() -> AuthzContext {
        let mut ctx = AuthzContext::new();
        ctx.establish_session(Identity::new(Uuid::now_v7()).with_role(Role::named("admin")));
        ctx
    }

    #[test]
    fn test_open_gate() {
        let query = doctor_ctx().query();
        assert!(Gate::open().is_visible(&query));

        let logged_out = AuthzContext::new();
        assert!(Gate::open().is_visible(&logged_out.query()));
    }

    #[test]
    fn test_role_gate() {
        let query = doctor_ctx().query();
        assert!(Gate::role("doctor").is_visible(&query));
        assert!(!Gate::role("admin").is_visible(&query));
    }

    #[test]
    fn test_permission_gate() {
        let query = doctor_ctx().query();
        assert!(Gate::permission("assessment.view").is_visible(&query));
        assert!(!Gate::permission("billing.manage").is_visible(&query));
    }

    #[test]
    fn test_any_of_gate() {
        let query = doctor_ctx().query();
        assert!(Gate::any_of(["billing.manage", "patient.read"]).is_visible(&query));
        assert!(!Gate::any_of(["billing.manage", "billing.view"]).is_visible(&query));
    }

    #[test]
    fn test_all_of_gate() {
        let query = doctor_ctx().query();
        assert!(Gate::all_of(["assessment.view", "patient.read"]).is_visible(&query));
        assert!(!Gate::all_of(["assessment.view", "billing.manage"]).is_visible(&query));
    }

    #[test]
    fn test_role_takes_precedence_over_permission() {
        let query = doctor_ctx().query();
        // Role constraint fails even though the permission would pass.
        let gate = Gate {
            role: Some("admin".to_string()),
            permission: Some("assessment.view".to_string()),
            ..Gate::default()
        };
        assert!(!gate.is_visible(&query));
    }

    #[test]
    fn test_admin_bypasses_every_mode() {
        let query = admin_ctx().query();
        assert!(Gate::role("doctor").is_visible(&query));
        assert!(Gate::permission("billing.manage").is_visible(&query));
        assert!(Gate::all_of(["a", "b", "c"]).is_visible(&query));
    }

    #[test]
    fn test_impersonating_admin_does_not_bypass() {
        let mut ctx = admin_ctx();
        ctx.start_impersonating(Identity::new(Uuid::now_v7())).unwrap();
        let query = ctx.query();

        assert!(!Gate::permission("billing.manage").is_visible(&query));
        assert!(!Gate::role("doctor").is_visible(&query));
        assert!(Gate::open().is_visible(&query));
    }

    #[test]
    fn test_empty_permissions_list_is_unset() {
        let query = doctor_ctx().query();
        let gate = Gate {
            permissions: Vec::new(),
            require_all: false,
            ..Gate::default()
        };
        assert!(gate.is_visible(&query));
    }

    #[test]
    fn test_gate_from_json() {
        let gate: Gate = serde_json::from_str(
            r#"{"permissions":["assessment.view","billing.manage"],"require_all":false}"#,
        )
        .unwrap();
        let query = doctor_ctx().query();
        assert!(gate.is_visible(&query));

        let gate: Gate = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert!(!gate.is_visible(&query));
    }
}
