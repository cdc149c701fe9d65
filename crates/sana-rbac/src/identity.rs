//! Identity records
//!
//! An identity is a resolved user snapshot: the roles and permissions
//! used for authorization decisions, captured when a session is
//! established or refreshed. Identities are immutable snapshots and are
//! replaced wholesale on profile refresh, never patched in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::permissions::{Permission, PermissionSet};
use crate::roles::Role;

/// A resolved user snapshot used for authorization decisions.
///
/// Permission sources, in resolution precedence order:
/// - `direct_permissions` - granted to the user directly
/// - `legacy_permissions` - deprecated alias kept for older backend
///   payloads that still deliver grants under the old field
/// - role permissions - granted through each role in `roles`
///
/// When `all_permissions` is present and non-empty it is the
/// authoritative precomputed union and the resolver uses it unchanged.
/// This tolerates backend-side business rules that are not expressible
/// as a pure union (e.g. revoked-but-cached roles).
///
/// # Example
///
/// ```
/// use sana_rbac::{Identity, Permission, Role};
/// use uuid::Uuid;
///
/// let identity = Identity::new(Uuid::now_v7())
///     .with_role(Role::named("doctor"))
///     .with_direct_permission(Permission::named("assessment.view"));
///
/// assert_eq!(identity.roles.len(), 1);
/// assert!(identity.direct_permissions.contains("assessment.view"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The user this snapshot belongs to.
    pub user_id: Uuid,

    /// Display name for UI chrome (impersonation banner, avatar).
    /// Never consulted for authorization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Roles held by the user.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Permissions granted directly to the user.
    #[serde(default)]
    pub direct_permissions: PermissionSet,

    /// Deprecated grant field still delivered by older backend payloads.
    #[serde(default)]
    pub legacy_permissions: PermissionSet,

    /// Precomputed union of all grants. Authoritative when present and
    /// non-empty; the resolver then skips the union entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_permissions: Option<PermissionSet>,

    /// When this snapshot was resolved.
    #[serde(default = "Utc::now")]
    pub resolved_at: DateTime<Utc>,

    /// Extra profile payload fields for extensibility.
    #[serde(default, flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

impl Identity {
    /// Create a new identity snapshot with no roles or permissions.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's unique identifier
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            display_name: None,
            roles: Vec::new(),
            direct_permissions: PermissionSet::new(),
            legacy_permissions: PermissionSet::new(),
            all_permissions: None,
            resolved_at: Utc::now(),
            custom: HashMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Add a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Add a direct permission grant.
    pub fn with_direct_permission(mut self, permission: Permission) -> Self {
        self.direct_permissions.insert(permission);
        self
    }

    /// Add a legacy permission grant.
    pub fn with_legacy_permission(mut self, permission: Permission) -> Self {
        self.legacy_permissions.insert(permission);
        self
    }

    /// Set the authoritative precomputed permission union.
    pub fn with_all_permissions(mut self, permissions: PermissionSet) -> Self {
        self.all_permissions = Some(permissions);
        self
    }

    /// Check whether the precomputed union is present and usable.
    ///
    /// An empty `all_permissions` is treated as absent: backends that
    /// send an empty array have simply not populated the field.
    pub fn has_authoritative_permissions(&self) -> bool {
        self.all_permissions
            .as_ref()
            .is_some_and(|set| !set.is_empty())
    }
}
