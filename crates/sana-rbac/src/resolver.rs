//! Permission resolution
//!
//! Pure functions computing the effective permission set of an identity
//! and evaluating permission/role predicates against it. All functions
//! accept `Option<&Identity>` because an absent identity (logged-out) is
//! a normal state, not an error: it resolves to "no access".
//!
//! None of these functions apply the admin bypass; that lives in the
//! `sana-authz` query facade where impersonation state is known.

use crate::identity::Identity;
use crate::permissions::PermissionSet;
use crate::roles::ADMIN_ROLE;

/// Compute the effective permission set of an identity.
///
/// Rules:
/// 1. `None` resolves to the empty set.
/// 2. A present, non-empty `all_permissions` is authoritative and is
///    returned unchanged.
/// 3. Otherwise the union is built in precedence order: direct
///    permissions, then legacy permissions, then each role's loaded
///    permissions. Deduplication is by permission name; earlier entries
///    win on collision.
///
/// # Example
///
/// ```
/// use sana_rbac::{Identity, Permission, Role, resolver};
/// use sana_rbac::permissions::PermissionSet;
/// use uuid::Uuid;
///
/// let identity = Identity::new(Uuid::now_v7())
///     .with_direct_permission(Permission::named("x"))
///     .with_role(
///         Role::named("doctor").with_permissions(PermissionSet::from_names(&["x", "y"])),
///     );
///
/// let resolved = resolver::resolve_permissions(Some(&identity));
/// assert_eq!(resolved.len(), 2);
/// ```
pub fn resolve_permissions(identity: Option<&Identity>) -> PermissionSet {
    let Some(identity) = identity else {
        return PermissionSet::new();
    };

    if identity.has_authoritative_permissions() {
        // Authoritative shortcut: the backend may encode business rules
        // here that a naive union cannot reproduce.
        return identity
            .all_permissions
            .clone()
            .unwrap_or_default();
    }

    let mut union = identity.direct_permissions.clone();
    union.merge(&identity.legacy_permissions);
    for role in &identity.roles {
        if let Some(role_perms) = &role.permissions {
            union.merge(role_perms);
        }
    }
    union
}

/// Check whether an identity holds a permission by name.
///
/// Checks the sources short-circuit in resolution order:
/// `all_permissions` (when authoritative), then direct, then legacy,
/// then each role. The result is always identical to membership in
/// [`resolve_permissions`].
pub fn has_permission(identity: Option<&Identity>, name: &str) -> bool {
    let Some(identity) = identity else {
        return false;
    };

    if identity.has_authoritative_permissions() {
        return identity
            .all_permissions
            .as_ref()
            .is_some_and(|set| set.contains(name));
    }

    identity.direct_permissions.contains(name)
        || identity.legacy_permissions.contains(name)
        || identity.roles.iter().any(|role| role.grants(name))
}

/// Check whether an identity holds a role by name.
///
/// `None` identity resolves to `false`.
pub fn has_role(identity: Option<&Identity>, role_name: &str) -> bool {
    identity.is_some_and(|identity| {
        identity.roles.iter().any(|role| role.name == role_name)
    })
}

/// Check whether an identity carries the distinguished admin role.
///
/// This says nothing about the admin *bypass*, which additionally
/// requires that no impersonation is active (see `sana-authz`).
pub fn is_admin_identity(identity: Option<&Identity>) -> bool {
    has_role(identity, ADMIN_ROLE)
}

/// Check whether an identity holds at least one of the named permissions.
///
/// An empty `names` list resolves to `false`.
pub fn has_any_permission(identity: Option<&Identity>, names: &[&str]) -> bool {
    names.iter().any(|name| has_permission(identity, name))
}

/// Check whether an identity holds every one of the named permissions.
///
/// An empty `names` list resolves to `true` (vacuous truth).
pub fn has_all_permissions(identity: Option<&Identity>, names: &[&str]) -> bool {
    names.iter().all(|name| has_permission(identity, name))
}
