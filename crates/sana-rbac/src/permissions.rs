//! # Permissions
//!
//! Core permission types and sets for the RBAC system.
//! A permission is an atomic, named capability grant.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// An atomic, named capability grant.
///
/// The `name` is a stable, globally unique key such as `"billing.manage"`
/// or `"assessment.view"`. The backend issues permissions and owns their
/// ids; the core treats them as immutable value types.
///
/// Equality and hashing are **by name only**. Two permissions carrying
/// different ids but the same name are the same grant.
///
/// # Example
///
/// ```
/// use sana_rbac::permissions::Permission;
///
/// let a = Permission::named("billing.manage");
/// let b = Permission::named("billing.manage");
/// assert_eq!(a, b); // ids differ, names match
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    /// Backend-assigned identifier. Never participates in equality.
    pub id: Uuid,
    /// Stable, globally unique permission key (e.g. `"billing.manage"`).
    pub name: String,
}

impl Permission {
    /// Create a permission with an explicit backend id.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Create a permission with a freshly generated id.
    ///
    /// Convenient when assembling identities in tests or fixtures where
    /// the backend id is irrelevant (equality is by name).
    ///
    /// # Example
    ///
    /// ```
    /// use sana_rbac::permissions::Permission;
    ///
    /// let perm = Permission::named("patient.read");
    /// assert_eq!(perm.name, "patient.read");
    /// ```
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }

    /// Get the permission key.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A set of permissions deduplicated by name.
///
/// Inserting a permission whose name is already present is a no-op: the
/// earlier entry wins. This matches the union precedence rule used by
/// [`crate::resolver::resolve_permissions`], where later sources never
/// overwrite earlier ones on name collision.
///
/// # Example
///
/// ```
/// use sana_rbac::permissions::{Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.insert(Permission::named("assessment.view"));
/// set.insert(Permission::named("assessment.view")); // no-op
///
/// assert!(set.contains("assessment.view"));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// Add a permission to the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was newly inserted, `false` if a
    /// permission with the same name was already present (in which case
    /// the existing entry is kept).
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Add multiple permissions to the set.
    ///
    /// # Arguments
    ///
    /// * `permissions` - An iterator of permissions to add
    pub fn extend<I>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        for perm in permissions {
            self.insert(perm);
        }
    }

    /// Check membership by permission name.
    ///
    /// # Example
    ///
    /// ```
    /// use sana_rbac::permissions::{Permission, PermissionSet};
    ///
    /// let set = PermissionSet::from_names(&["billing.manage"]);
    /// assert!(set.contains("billing.manage"));
    /// assert!(!set.contains("billing.view"));
    /// ```
    pub fn contains(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name == name)
    }

    /// Merge another permission set into this one.
    ///
    /// Entries already present (by name) are kept as-is.
    pub fn merge(&mut self, other: &PermissionSet) {
        for perm in &other.permissions {
            if !self.contains(&perm.name) {
                self.permissions.insert(perm.clone());
            }
        }
    }

    /// Create from a list of permission names.
    ///
    /// # Example
    ///
    /// ```
    /// use sana_rbac::permissions::PermissionSet;
    ///
    /// let set = PermissionSet::from_names(&["patient.read", "patient.update"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_names(names: &[&str]) -> Self {
        let mut set = Self::new();
        for name in names {
            set.insert(Permission::named(*name));
        }
        set
    }

    /// Iterate over the permissions in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Get all permission names in the set.
    pub fn names(&self) -> Vec<&str> {
        self.permissions.iter().map(|p| p.name.as_str()).collect()
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_equality_by_name() {
        let a = Permission::new(Uuid::now_v7(), "billing.manage");
        let b = Permission::new(Uuid::now_v7(), "billing.manage");
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_permission_inequality() {
        let a = Permission::named("billing.manage");
        let b = Permission::named("billing.view");
        assert_ne!(a, b);
    }

    #[test]
    fn test_permission_display() {
        let perm = Permission::named("assessment.view");
        assert_eq!(perm.to_string(), "assessment.view");
        assert_eq!(perm.as_str(), "assessment.view");
    }

    #[test]
    fn test_set_dedup_by_name() {
        let mut set = PermissionSet::new();
        assert!(set.insert(Permission::named("x")));
        assert!(!set.insert(Permission::named("x")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_keeps_earlier_entry() {
        let first = Permission::new(Uuid::now_v7(), "x");
        let first_id = first.id;

        let mut set = PermissionSet::new();
        set.insert(first);
        set.insert(Permission::named("x"));

        let kept = set.iter().find(|p| p.name == "x").unwrap();
        assert_eq!(kept.id, first_id);
    }

    #[test]
    fn test_set_contains() {
        let set = PermissionSet::from_names(&["patient.read", "patient.update"]);
        assert!(set.contains("patient.read"));
        assert!(set.contains("patient.update"));
        assert!(!set.contains("patient.delete"));
    }

    #[test]
    fn test_set_merge_earlier_wins() {
        let a = Permission::new(Uuid::now_v7(), "x");
        let a_id = a.id;
        let mut set1 = PermissionSet::new();
        set1.insert(a);

        let mut set2 = PermissionSet::new();
        set2.insert(Permission::named("x"));
        set2.insert(Permission::named("y"));

        set1.merge(&set2);
        assert_eq!(set1.len(), 2);
        let kept = set1.iter().find(|p| p.name == "x").unwrap();
        assert_eq!(kept.id, a_id);
    }

    #[test]
    fn test_set_from_iterator() {
        let set: PermissionSet = vec![
            Permission::named("a"),
            Permission::named("b"),
            Permission::named("a"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_serde_roundtrip() {
        let set = PermissionSet::from_names(&["billing.manage"]);
        let json = serde_json::to_string(&set).unwrap();
        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert!(back.contains("billing.manage"));
        assert_eq!(back.len(), 1);
    }
}
