//! Integration tests for the dashboard on a file-backed session record.
//!
//! Tests the complete flow: ZionConfig → Dashboard → LocalFileStore → view

use std::path::Path;
use tempfile::TempDir;
use zion_auth::{GuardDecision, ResolutionState};
use zion_runtime::{Dashboard, DashboardError, LocalFileStore, SessionStore, ZionConfig};
use zion_types::{Role, UnitId};

const SEED: &str = r#"{
  "accounts": [
    {
      "id": "u-moyo",
      "email": "sister.moyo@harare.zw",
      "password": "secret",
      "full_name": "Sister Moyo",
      "role": "unit-leader",
      "units": ["norton"]
    },
    {
      "id": "u-orphan",
      "email": "orphan@harare.zw",
      "password": "secret"
    }
  ]
}"#;

fn config_in(dir: &Path) -> ZionConfig {
    let mut config = ZionConfig::default();
    config.session.path = Some(dir.join("state").join("session.json"));
    config
}

fn with_backend(dir: &Path) -> ZionConfig {
    let seed = dir.join("seed.json");
    std::fs::write(&seed, SEED).expect("should write seed file");

    let mut config = config_in(dir);
    config.backend.url = Some("https://db.example".into());
    config.backend.anon_key = Some("anon".into());
    config.backend.seed_file = Some(seed);
    config
}

/// Demo sign-in survives a fresh dashboard built from the same config
#[tokio::test]
async fn session_persists_across_instances() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = config_in(temp.path());

    let first = Dashboard::from_config(&config).expect("should build dashboard");
    first
        .sign_in("bishop.chitungwiza@harare.zw", "Bishop123!")
        .await
        .expect("demo credentials should sign in");
    first.set_sidebar(false).await.expect("should store preference");

    let second = Dashboard::from_config(&config).expect("should rebuild dashboard");
    let view = second.view(Some("/analytics")).await.expect("should build view");

    assert_eq!(view.state, ResolutionState::DemoResolved);
    assert_eq!(view.user.role(), Role::UnitLeader);
    assert!(!view.sidebar_open);
    assert_eq!(view.selected_unit, Some(UnitId::new("chitungwiza")));
    assert!(view.page.expect("page requested").decision.is_granted());
}

/// Backend sign-in resolves the profile from the seed file
#[tokio::test]
async fn backend_account_flow() {
    let temp = TempDir::new().expect("should create temp dir");
    let dashboard =
        Dashboard::from_config(&with_backend(temp.path())).expect("should build dashboard");
    assert!(dashboard.has_backend());

    let session = dashboard
        .sign_in("SISTER.MOYO@harare.zw", "secret")
        .await
        .expect("seed account should sign in");
    assert_eq!(session.state, ResolutionState::StoreResolved);
    assert_eq!(session.user.name(), "Sister Moyo");

    let view = dashboard.view(None).await.expect("should build view");
    assert_eq!(view.selected_unit, Some(UnitId::new("norton")));
    assert!(view.navigation.find("/data-entry").is_some());
    assert!(view.navigation.find("/user-management").is_none());
}

/// A profile without role or name gets the lowest role and default name
#[tokio::test]
async fn account_without_profile_role_is_viewer() {
    let temp = TempDir::new().expect("should create temp dir");
    let dashboard =
        Dashboard::from_config(&with_backend(temp.path())).expect("should build dashboard");

    let session = dashboard
        .sign_in("orphan@harare.zw", "secret")
        .await
        .expect("seed account should sign in");
    assert_eq!(session.state, ResolutionState::StoreResolved);
    assert_eq!(session.user.role(), Role::Viewer);
    assert_eq!(session.user.name(), "User");
}

/// Sign-out removes the file and locks guarded pages again
#[tokio::test]
async fn sign_out_removes_record() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = config_in(temp.path());
    let dashboard = Dashboard::from_config(&config).expect("should build dashboard");

    dashboard
        .sign_in("stake.leader@harare.zw", "StakeLeader123!")
        .await
        .expect("demo credentials should sign in");
    assert!(dashboard.store().path().exists());

    dashboard.sign_out().await.expect("should sign out");
    assert!(!dashboard.store().path().exists());
    assert_eq!(
        dashboard.guard("/rollup").await.expect("should check page"),
        GuardDecision::AuthenticationRequired
    );
}

/// A zero lifetime expires the record before the next request
#[tokio::test]
async fn zero_lifetime_expires_immediately() {
    let temp = TempDir::new().expect("should create temp dir");
    let mut config = config_in(temp.path());
    config.session.max_age_days = 0;
    let dashboard = Dashboard::from_config(&config).expect("should build dashboard");

    dashboard
        .sign_in("stake.leader@harare.zw", "StakeLeader123!")
        .await
        .expect("demo credentials should sign in");

    let session = dashboard.current_user().await.expect("should resolve");
    assert!(session.user.is_anonymous());

    let store = LocalFileStore::new(config.session.resolved_path()).expect("should open store");
    assert!(store.load().await.expect("should load").is_none());
}

/// A truncated record degrades to anonymous and does not block sign-in
#[tokio::test]
async fn malformed_record_is_discarded() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = config_in(temp.path());
    let dashboard = Dashboard::from_config(&config).expect("should build dashboard");
    std::fs::write(dashboard.store().path(), r#"{"demo_marker": "stake-leader""#)
        .expect("should write truncated record");

    let session = dashboard.current_user().await.expect("should resolve");
    assert_eq!(session.state, ResolutionState::FallbackAnonymous);
    assert!(session.user.is_anonymous());
    assert!(!dashboard.store().path().exists());

    std::fs::write(dashboard.store().path(), "not json").expect("should write garbage");
    let session = dashboard
        .sign_in("stake.leader@harare.zw", "StakeLeader123!")
        .await
        .expect("sign-in should replace a malformed record");
    assert_eq!(session.user.role(), Role::StakeLeader);
    assert!(store_loads(&config).await);
}

async fn store_loads(config: &ZionConfig) -> bool {
    let store = LocalFileStore::new(config.session.resolved_path()).expect("should open store");
    store.load().await.expect("should load").is_some()
}

/// A missing seed file is reported when the dashboard is built
#[test]
fn missing_seed_file_fails_construction() {
    let temp = TempDir::new().expect("should create temp dir");
    let mut config = with_backend(temp.path());
    config.backend.seed_file = Some(temp.path().join("missing.json"));

    let err = Dashboard::from_config(&config).expect_err("missing seed should fail");
    assert!(matches!(err, DashboardError::Backend(_)));
}
