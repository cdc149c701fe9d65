//! # Sana Authorization
//!
//! This crate provides the impersonation-aware authorization core for
//! the Sana platform, shared across the patient, doctor, and admin
//! dashboards.
//!
//! ## Overview
//!
//! The sana-authz crate handles:
//! - **Context**: Session-scoped authorization state holding the real
//!   authenticated identity and an optional impersonated identity
//! - **Impersonation**: An admin acting as another user, evaluated
//!   strictly under that user's own grants
//! - **Query facade**: Memoized permission/role predicates over the
//!   active identity, with the admin bypass
//! - **Gating**: Declarative show/hide decisions for protected UI
//!
//! ## Security model
//!
//! The admin bypass grants every permission check to an identity
//! carrying the `"admin"` role - but it is suppressed while
//! impersonating. An admin acting as a patient sees exactly what that
//! patient would see. This is a deliberate invariant, kept as a single
//! `is_admin` flag rather than scattered conditionals.
//!
//! ## Usage
//!
//! ```rust
//! use sana_authz::{AuthzContext, Gate};
//! use sana_rbac::{Identity, Role};
//! use uuid::Uuid;
//!
//! let admin = Identity::new(Uuid::now_v7()).with_role(Role::named("admin"));
//! let patient = Identity::new(Uuid::now_v7()).with_role(Role::named("patient"));
//!
//! let mut ctx = AuthzContext::new();
//! ctx.establish_session(admin);
//!
//! let query = ctx.query();
//! assert!(query.is_admin());
//! assert!(query.has_permission("billing.manage")); // admin bypass
//!
//! ctx.start_impersonating(patient).unwrap();
//! let query = ctx.query();
//! assert!(!query.is_admin()); // bypass suppressed
//! assert!(!query.has_permission("billing.manage"));
//!
//! ctx.stop_impersonating();
//! assert!(ctx.query().is_admin());
//! ```
//!
//! ## Integration with sana-rbac
//!
//! Identity resolution and the pure predicates live in `sana-rbac`;
//! this crate layers state, memoization, and the bypass on top.

pub mod context;
pub mod error;
pub mod gate;
pub mod query;

// Re-export main types
pub use context::AuthzContext;
pub use error::{AuthzError, AuthzResult};
pub use gate::Gate;
pub use query::AuthzQuery;
