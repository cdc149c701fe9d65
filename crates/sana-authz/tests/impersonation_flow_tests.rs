//! End-to-end authorization scenarios across the context, query facade,
//! and gating layers.

use sana_authz::{AuthzContext, AuthzError, Gate};
use sana_rbac::{resolver, Identity, Permission, PermissionSet, Role};
use uuid::Uuid;

fn admin() -> Identity {
    Identity::new(Uuid::now_v7())
        .with_display_name("Site Admin")
        .with_role(Role::named("admin"))
}

fn patient_without_permissions() -> Identity {
    Identity::new(Uuid::now_v7())
        .with_display_name("Test Patient")
        .with_role(Role::named("patient"))
}

#[test]
fn admin_support_session_full_flow() {
    // An admin opens a support session: impersonates a patient, checks
    // what the patient can see, then returns to their own session.
    let mut ctx = AuthzContext::new();
    ctx.establish_session(admin());

    let before = ctx.query();
    assert!(before.is_admin());
    assert!(before.has_permission("billing.manage"));
    assert!(Gate::permission("billing.manage").is_visible(&before));

    let patient = patient_without_permissions();
    let patient_id = patient.user_id;
    ctx.start_impersonating(patient).unwrap();

    let during = ctx.query();
    assert_eq!(during.user_id(), Some(patient_id));
    assert!(during.is_impersonating());
    assert!(!during.is_admin());
    assert!(!during.has_permission("billing.manage"));
    assert!(!Gate::permission("billing.manage").is_visible(&during));
    assert!(during.has_role("patient"));

    ctx.stop_impersonating();

    let after = ctx.query();
    assert!(after.is_admin());
    assert!(!after.is_impersonating());
    assert!(after.has_permission("billing.manage"));
}

#[test]
fn stop_impersonating_twice_matches_once() {
    let mut ctx = AuthzContext::new();
    ctx.establish_session(admin());
    ctx.start_impersonating(patient_without_permissions()).unwrap();

    ctx.stop_impersonating();
    let once = (ctx.epoch(), ctx.is_impersonating(), ctx.is_admin());

    ctx.stop_impersonating();
    let twice = (ctx.epoch(), ctx.is_impersonating(), ctx.is_admin());

    assert_eq!(once, twice);
}

#[test]
fn impersonation_without_session_is_rejected() {
    let mut ctx = AuthzContext::new();
    assert_eq!(
        ctx.start_impersonating(patient_without_permissions()),
        Err(AuthzError::NoActiveSession)
    );
}

#[test]
fn doctor_assessment_scenario() {
    // Doctor with an authoritative precomputed union.
    let doctor = Identity::new(Uuid::now_v7())
        .with_role(Role::named("doctor"))
        .with_all_permissions(PermissionSet::from_names(&["assessment.view"]));

    assert!(resolver::has_permission(Some(&doctor), "assessment.view"));
    assert!(!resolver::has_role(Some(&doctor), "admin"));

    let mut ctx = AuthzContext::new();
    ctx.establish_session(doctor);
    let query = ctx.query();

    assert!(query.has_permission("assessment.view"));
    assert!(!query.is_admin());
    assert!(Gate::permission("assessment.view").is_visible(&query));
    assert!(!Gate::role("admin").is_visible(&query));
}

#[test]
fn authoritative_union_overrides_direct_grants() {
    let identity = Identity::new(Uuid::now_v7())
        .with_direct_permission(Permission::named("x"))
        .with_all_permissions(PermissionSet::from_names(&["z"]));

    let mut ctx = AuthzContext::new();
    ctx.establish_session(identity);
    let query = ctx.query();

    assert!(query.has_permission("z"));
    assert!(!query.has_permission("x"));
}

#[test]
fn union_dedup_across_sources() {
    let identity = Identity::new(Uuid::now_v7())
        .with_direct_permission(Permission::named("x"))
        .with_role(
            Role::named("doctor").with_permissions(PermissionSet::from_names(&["x", "y"])),
        );

    let resolved = resolver::resolve_permissions(Some(&identity));
    assert_eq!(resolved.len(), 2);
    assert!(resolved.contains("x"));
    assert!(resolved.contains("y"));
}

#[test]
fn quantifier_laws_for_non_admin() {
    let mut ctx = AuthzContext::new();
    ctx.establish_session(patient_without_permissions());
    let query = ctx.query();

    assert!(!query.has_any_permission(&[]));
    assert!(query.has_all_permissions(&[]));
}

#[test]
fn logout_tears_down_everything() {
    let mut ctx = AuthzContext::new();
    ctx.establish_session(admin());
    ctx.start_impersonating(patient_without_permissions()).unwrap();

    ctx.clear_session();
    let query = ctx.query();

    assert!(query.user_id().is_none());
    assert!(!query.is_admin());
    assert!(!query.has_permission("anything"));
    // Re-establish works after logout.
    ctx.establish_session(admin());
    assert!(ctx.query().is_admin());
}
