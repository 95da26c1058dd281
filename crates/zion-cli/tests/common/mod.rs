//! Shared E2E test helpers for `zion` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Variables from the developer's shell that would leak into the config.
const ZION_VARS: &[&str] = &[
    "ZION_DEBUG",
    "ZION_DEMO",
    "ZION_BACKEND_URL",
    "ZION_BACKEND_KEY",
    "ZION_SEED_FILE",
    "ZION_SESSION_PATH",
    "ZION_SESSION_MAX_AGE_DAYS",
    "ZION_UNITS",
    "ZION_PASSWORD",
    "RUST_LOG",
];

/// Build a Command for the `zion` binary isolated in `home`.
///
/// `home` doubles as `$HOME` and working directory, so neither the global
/// nor a project config from the real machine is picked up.
pub fn zion_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("zion");
    cmd.timeout(TIMEOUT_BASIC);
    for var in ZION_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home).current_dir(home);
    cmd.arg("--session-path").arg(home.join("session.json"));
    cmd
}

/// Signs in with demo credentials, panicking on failure.
pub fn login(home: &Path, email: &str, password: &str) {
    zion_cmd(home)
        .args(["login", email, "--password", password])
        .assert()
        .success();
}

pub const STAKE: (&str, &str) = ("stake.leader@harare.zw", "StakeLeader123!");
pub const BISHOP: (&str, &str) = ("bishop.harare1@harare.zw", "Bishop123!");
pub const CLERK: (&str, &str) = ("clerk.harare2@harare.zw", "Clerk123!");
