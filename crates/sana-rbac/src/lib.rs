//! # Sana RBAC (Role-Based Access Control)
//!
//! This crate provides the permission and identity model for the Sana
//! platform, shared across the patient, doctor, and admin dashboards.
//!
//! ## Overview
//!
//! The sana-rbac crate handles:
//! - **Permissions**: Named capability grants (e.g. `"billing.manage"`)
//! - **Permission Sets**: Name-deduplicated collections of permissions
//! - **Roles**: Named bundles of permissions (`"admin"` is distinguished)
//! - **Identities**: Resolved user snapshots (roles + permissions)
//! - **Resolution**: Computing the effective permission set of an identity
//!
//! ## Architecture
//!
//! ```text
//! Identity = roles + direct permissions [+ precomputed union]
//!
//! resolve_permissions(identity):
//!   all_permissions present  -> use it (authoritative)
//!   otherwise                -> direct ∪ legacy ∪ role permissions
//! ```
//!
//! Permission equality is by `name` only. Two permissions with different
//! ids but the same name are the same grant; the backend owns ids.
//!
//! ## Usage
//!
//! ```rust
//! use sana_rbac::{Identity, Permission, Role, resolver};
//!
//! let identity = Identity::new(uuid::Uuid::now_v7())
//!     .with_role(Role::named("doctor"))
//!     .with_direct_permission(Permission::named("assessment.view"));
//!
//! assert!(resolver::has_permission(Some(&identity), "assessment.view"));
//! assert!(resolver::has_role(Some(&identity), "doctor"));
//! assert!(!resolver::is_admin_identity(Some(&identity)));
//! ```
//!
//! ## Integration with sana-authz
//!
//! This crate is deliberately pure: no state, no bypass rules. The
//! `sana-authz` crate layers the impersonation-aware authorization
//! context and the admin bypass on top of these resolvers.

pub mod identity;
pub mod permissions;
pub mod resolver;
pub mod roles;

// Re-export main types for convenience
pub use identity::Identity;
pub use permissions::{Permission, PermissionSet};
pub use roles::{Role, ADMIN_ROLE};
