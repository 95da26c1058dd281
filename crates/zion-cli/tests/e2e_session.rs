//! E2E tests for sign-in, identity and page access.

mod common;

use common::{login, zion_cmd, BISHOP, CLERK, STAKE};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── Sign-in ───────────────────────────────────────────────────────

#[test]
fn anonymous_whoami() {
    let home = tempfile::tempdir().expect("create temp home");
    zion_cmd(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Demo User"))
        .stdout(contains("fallback-anonymous"))
        .stdout(contains("closed (role default)"));
}

#[test]
fn demo_login_and_whoami() {
    let home = tempfile::tempdir().expect("create temp home");
    zion_cmd(home.path())
        .args(["login", STAKE.0, "--password", STAKE.1])
        .assert()
        .success()
        .stdout(contains("Signed in as"))
        .stdout(contains("Stake Leader"));

    zion_cmd(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("demo-resolved"))
        .stdout(contains("open (role default)"))
        .stdout(contains("Working: harare-1st"));
}

#[test]
fn password_from_environment() {
    let home = tempfile::tempdir().expect("create temp home");
    zion_cmd(home.path())
        .env("ZION_PASSWORD", CLERK.1)
        .args(["login", CLERK.0])
        .assert()
        .success()
        .stdout(contains("Viewer"));
}

#[test]
fn unknown_login_without_backend_fails() {
    let home = tempfile::tempdir().expect("create temp home");
    zion_cmd(home.path())
        .args(["login", "someone@example.org", "--password", "secret"])
        .assert()
        .failure()
        .stderr(contains("Authentication service is not available"));
}

#[test]
fn logout_returns_to_anonymous() {
    let home = tempfile::tempdir().expect("create temp home");
    login(home.path(), STAKE.0, STAKE.1);

    zion_cmd(home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Signed out"));
    assert!(!home.path().join("session.json").exists());

    zion_cmd(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("fallback-anonymous"));
}

#[test]
fn whoami_json() {
    let home = tempfile::tempdir().expect("create temp home");
    login(home.path(), CLERK.0, CLERK.1);

    let output = zion_cmd(home.path())
        .args(["whoami", "--json"])
        .output()
        .expect("run whoami");
    assert!(output.status.success());

    let view: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("whoami --json prints JSON");
    assert_eq!(view["state"], "demo-resolved");
    assert_eq!(view["user"]["role"], "viewer");
    assert_eq!(view["sidebar_open"], false);
    assert_eq!(view["selected_unit"], "harare-2nd");
}

#[test]
fn malformed_session_file_does_not_block_login() {
    let home = tempfile::tempdir().expect("create temp home");
    std::fs::write(home.path().join("session.json"), r#"{"demo_marker": "#)
        .expect("write truncated session");

    zion_cmd(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("fallback-anonymous"));

    std::fs::write(home.path().join("session.json"), "garbage").expect("write garbage session");
    zion_cmd(home.path())
        .args(["login", STAKE.0, "--password", STAKE.1])
        .assert()
        .success()
        .stdout(contains("Stake Leader"));
}

// ─── Navigation & guards ───────────────────────────────────────────

#[test]
fn nav_for_viewer_hides_management() {
    let home = tempfile::tempdir().expect("create temp home");
    login(home.path(), CLERK.0, CLERK.1);

    zion_cmd(home.path())
        .arg("nav")
        .assert()
        .success()
        .stdout(contains("/units"))
        .stdout(contains("/user-management").not())
        .stdout(contains("/data-entry").not());
}

#[test]
fn nav_role_preview() {
    let home = tempfile::tempdir().expect("create temp home");
    zion_cmd(home.path())
        .args(["nav", "--role", "stake-leader"])
        .assert()
        .success()
        .stdout(contains("Stake Leadership"))
        .stdout(contains("/user-management"));
}

#[test]
fn guard_denies_and_grants() {
    let home = tempfile::tempdir().expect("create temp home");

    zion_cmd(home.path())
        .args(["guard", "/units"])
        .assert()
        .code(1)
        .stdout(contains("sign-in required"));

    login(home.path(), CLERK.0, CLERK.1);
    zion_cmd(home.path())
        .args(["guard", "/user-management"])
        .assert()
        .code(1)
        .stdout(contains("access denied"));

    login(home.path(), STAKE.0, STAKE.1);
    zion_cmd(home.path())
        .args(["guard", "/user-management"])
        .assert()
        .success()
        .stdout(contains("granted"));
}

#[test]
fn unguarded_page_is_granted() {
    let home = tempfile::tempdir().expect("create temp home");
    zion_cmd(home.path())
        .args(["guard", "/login"])
        .assert()
        .success();
}

#[test]
fn check_permissions() {
    let home = tempfile::tempdir().expect("create temp home");
    login(home.path(), BISHOP.0, BISHOP.1);

    zion_cmd(home.path())
        .args(["check", "view-analytics"])
        .assert()
        .success()
        .stdout(contains("allowed"));

    zion_cmd(home.path())
        .args(["check", "view-analytics", "manage-users", "--all"])
        .assert()
        .code(1)
        .stdout(contains("denied"));

    zion_cmd(home.path())
        .args(["check", "launch-rockets"])
        .assert()
        .failure()
        .stderr(contains("unknown permission"));
}
