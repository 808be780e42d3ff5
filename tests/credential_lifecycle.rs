//! Service-level tests for the credential lifecycle and snapshot
//! distribution invariants.

mod common;

use wardplane::domain::CredentialId;
use wardplane::errors::Error;
use wardplane::services::{CredentialService, ProjectService, SnapshotService};

use common::setup_pool;

async fn services() -> (ProjectService, CredentialService, SnapshotService) {
    let pool = setup_pool().await;
    (
        ProjectService::with_sqlx(pool.clone()),
        CredentialService::with_sqlx(pool.clone()),
        SnapshotService::with_sqlx(pool),
    )
}

#[tokio::test]
async fn issuing_returns_secret_that_verifies_against_stored_hash() {
    let (projects, credentials, _) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();

    let (raw_secret, credential) = credentials.issue(&project.id).await.unwrap();

    assert!(credential.is_active());
    assert!(credentials.verify(&credential.secret_hash, raw_secret.expose()));
    assert!(!credentials.verify(&credential.secret_hash, "wrong-secret"));
    assert!(!credentials.verify(&credential.secret_hash, ""));
    assert!(!credentials.verify(&credential.secret_hash, credential.secret_hash.as_str()));
}

#[tokio::test]
async fn reissue_leaves_exactly_one_active_credential() {
    let (projects, credentials, _) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();

    let (_, first) = credentials.issue(&project.id).await.unwrap();
    let (_, second) = credentials.issue(&project.id).await.unwrap();
    assert_ne!(first.id, second.id);

    let history = credentials.list_for_project(&project.id).await.unwrap();
    assert_eq!(history.len(), 2);

    let active: Vec<_> = history.iter().filter(|c| c.is_active()).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);

    let superseded = history.iter().find(|c| c.id == first.id).unwrap();
    assert!(superseded.revoked_at.is_some());
}

#[tokio::test]
async fn concurrent_issues_never_leave_two_active_credentials() {
    let (projects, credentials, _) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();

    let (a, b) = tokio::join!(credentials.issue(&project.id), credentials.issue(&project.id));
    assert!(a.is_ok() || b.is_ok());

    let history = credentials.list_for_project(&project.id).await.unwrap();
    let active_count = history.iter().filter(|c| c.is_active()).count();
    assert_eq!(active_count, 1);
}

#[tokio::test]
async fn issue_for_unknown_project_is_not_found() {
    let (_, credentials, _) = services().await;
    let missing = wardplane::domain::ProjectId::new();

    let err = credentials.issue(&missing).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn double_revocation_is_a_conflict() {
    let (projects, credentials, _) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();
    let (_, credential) = credentials.issue(&project.id).await.unwrap();

    credentials.revoke(&project.id, &credential.id).await.unwrap();

    let err = credentials.revoke(&project.id, &credential.id).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn revoking_unknown_credential_is_not_found() {
    let (projects, credentials, _) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();

    let err = credentials.revoke(&project.id, &CredentialId::new()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn snapshot_reflects_revocation_with_zero_lag() {
    let (projects, credentials, snapshots) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();
    let (_, credential) = credentials.issue(&project.id).await.unwrap();

    let before = snapshots.build().await.unwrap();
    assert_eq!(before.projects.len(), 1);
    assert_eq!(before.projects[0].credential_hash, credential.secret_hash);

    credentials.revoke(&project.id, &credential.id).await.unwrap();

    // The very next build must not carry the revoked hash.
    let after = snapshots.build().await.unwrap();
    assert!(after.projects.is_empty());
}

#[tokio::test]
async fn revoked_credential_never_reappears_in_later_snapshots() {
    let (projects, credentials, snapshots) = services().await;
    let project = projects.create("checkout", "https://api.example.com").await.unwrap();

    let (_, first) = credentials.issue(&project.id).await.unwrap();
    let (_, second) = credentials.issue(&project.id).await.unwrap();

    for _ in 0..3 {
        let snapshot = snapshots.build().await.unwrap();
        let hashes: Vec<_> =
            snapshot.projects.iter().map(|entry| entry.credential_hash.clone()).collect();
        assert!(!hashes.contains(&first.secret_hash));
        assert!(hashes.contains(&second.secret_hash));
    }
}

#[tokio::test]
async fn end_to_end_issue_rotate_revoke_flow() {
    let (projects, credentials, snapshots) = services().await;
    let project = projects.create("orders", "https://orders.internal").await.unwrap();

    let (_, first) = credentials.issue(&project.id).await.unwrap();
    let snapshot = snapshots.build().await.unwrap();
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.projects[0].project_id, project.id);
    assert_eq!(snapshot.projects[0].upstream_url, "https://orders.internal");
    assert_eq!(snapshot.projects[0].credential_hash, first.secret_hash);

    let (_, second) = credentials.issue(&project.id).await.unwrap();
    let snapshot = snapshots.build().await.unwrap();
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.projects[0].credential_hash, second.secret_hash);

    credentials.revoke(&project.id, &second.id).await.unwrap();
    let snapshot = snapshots.build().await.unwrap();
    assert!(snapshot.projects.is_empty());
}

#[tokio::test]
async fn deactivated_project_drops_out_of_snapshots_but_keeps_history() {
    let (projects, credentials, snapshots) = services().await;
    let project = projects.create("legacy", "https://legacy.example.com").await.unwrap();
    let (_, credential) = credentials.issue(&project.id).await.unwrap();

    projects.deactivate(&project.id).await.unwrap();

    let snapshot = snapshots.build().await.unwrap();
    assert!(snapshot.projects.is_empty());

    // The credential row survives the deactivation, still active.
    let active = credentials.active_for(&project.id).await.unwrap();
    assert_eq!(active.map(|c| c.id), Some(credential.id));
}

#[tokio::test]
async fn deactivate_is_idempotent_and_unknown_project_is_not_found() {
    let (projects, _, _) = services().await;
    let project = projects.create("a", "https://a.example.com").await.unwrap();

    projects.deactivate(&project.id).await.unwrap();
    projects.deactivate(&project.id).await.unwrap();

    let err = projects.deactivate(&wardplane::domain::ProjectId::new()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn snapshot_order_follows_project_creation_order() {
    let (projects, credentials, snapshots) = services().await;

    let first = projects.create("alpha", "https://alpha.example.com").await.unwrap();
    let second = projects.create("beta", "https://beta.example.com").await.unwrap();
    let third = projects.create("gamma", "https://gamma.example.com").await.unwrap();

    // Issue out of creation order; snapshot order must not care.
    credentials.issue(&third.id).await.unwrap();
    credentials.issue(&first.id).await.unwrap();
    credentials.issue(&second.id).await.unwrap();

    let snapshot = snapshots.build().await.unwrap();
    let ids: Vec<_> = snapshot.projects.iter().map(|entry| entry.project_id.clone()).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[tokio::test]
async fn project_without_credential_is_omitted_from_snapshot() {
    let (projects, credentials, snapshots) = services().await;

    let with_key = projects.create("with-key", "https://one.example.com").await.unwrap();
    projects.create("without-key", "https://two.example.com").await.unwrap();
    credentials.issue(&with_key.id).await.unwrap();

    let snapshot = snapshots.build().await.unwrap();
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.projects[0].project_id, with_key.id);
}

#[tokio::test]
async fn upstream_update_rejects_malformed_urls_and_inactive_projects() {
    let (projects, _, _) = services().await;
    let project = projects.create("svc", "https://svc.example.com").await.unwrap();

    let err = projects.update_upstream(&project.id, "not a url").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let updated = projects.update_upstream(&project.id, "https://svc-v2.example.com").await.unwrap();
    assert_eq!(updated.upstream_url, "https://svc-v2.example.com");

    projects.deactivate(&project.id).await.unwrap();
    let err = projects.update_upstream(&project.id, "https://svc-v3.example.com").await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}
