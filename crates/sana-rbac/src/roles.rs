//! Roles
//!
//! A role is a named bundle of permissions referenced by identities.
//! The role named exactly `"admin"` is distinguished: it is the sole
//! admin marker, there is no separate boolean flag anywhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permissions::PermissionSet;

/// Name of the distinguished admin role.
///
/// An identity carrying a role with this exact name is an admin. The
/// admin bypass built on top of this (see `sana-authz`) is suppressed
/// while impersonating.
pub const ADMIN_ROLE: &str = "admin";

/// A named bundle of permissions.
///
/// Roles are referenced by identities, never owned by them
/// (many-to-many). The `permissions` field may be absent when the
/// backend delivered the role without its permission list loaded; an
/// unloaded role contributes nothing to permission resolution.
///
/// # Example
///
/// ```
/// use sana_rbac::roles::{Role, ADMIN_ROLE};
///
/// let role = Role::named("doctor");
/// assert!(!role.is_admin());
/// assert!(Role::named(ADMIN_ROLE).is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Backend-assigned identifier.
    pub id: Uuid,

    /// Role name (e.g. `"patient"`, `"doctor"`, `"admin"`).
    pub name: String,

    /// Permissions granted by this role, when loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl Role {
    /// Create a role with an explicit backend id and no loaded permissions.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permissions: None,
        }
    }

    /// Create a role with a freshly generated id and no loaded permissions.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Uuid::now_v7(), name)
    }

    /// Attach a loaded permission set to this role.
    ///
    /// # Example
    ///
    /// ```
    /// use sana_rbac::permissions::PermissionSet;
    /// use sana_rbac::roles::Role;
    ///
    /// let role = Role::named("doctor")
    ///     .with_permissions(PermissionSet::from_names(&["assessment.view"]));
    /// assert!(role.permissions.is_some());
    /// ```
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Check whether this is the distinguished admin role.
    pub fn is_admin(&self) -> bool {
        self.name == ADMIN_ROLE
    }

    /// Check whether this role grants a permission by name.
    ///
    /// An unloaded role (no permission list) grants nothing.
    pub fn grants(&self, permission_name: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| perms.contains(permission_name))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
