//! Demo identities.
//!
//! A fixed set of fixture users addressable by a short marker string. When a
//! request carries a known marker the resolver returns the fixture without
//! contacting any collaborator, so the dashboard can be explored with no
//! backend at all.
//!
//! | Marker | Role | Units |
//! |--------|------|-------|
//! | `stake-leader` | stake-leader | all seven units |
//! | `unit-leader-harare1` | unit-leader | harare-1st |
//! | `unit-leader-chitungwiza` | unit-leader | chitungwiza |
//! | `viewer-harare2` | viewer | harare-2nd |
//! | `ysa-leader` | unit-leader | ysa-branch |

use crate::CurrentUser;
use serde::Serialize;
use zion_types::{Role, UnitId};

/// Sign-in credentials that map to a demo marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoCredential {
    pub email: &'static str,
    #[serde(skip)]
    pub password: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub marker: &'static str,
}

const STAKE_UNITS: [&str; 7] = [
    "harare-1st",
    "harare-2nd",
    "harare-3rd",
    "chitungwiza",
    "norton",
    "ruwa",
    "ysa-branch",
];

static CREDENTIALS: [DemoCredential; 5] = [
    DemoCredential {
        email: "stake.leader@harare.zw",
        password: "StakeLeader123!",
        label: "Stake Leader",
        description: "Full access to all units in Harare Zimbabwe South Stake",
        marker: "stake-leader",
    },
    DemoCredential {
        email: "bishop.harare1@harare.zw",
        password: "Bishop123!",
        label: "Unit Leader",
        description: "Bishop of Harare 1st Ward",
        marker: "unit-leader-harare1",
    },
    DemoCredential {
        email: "bishop.chitungwiza@harare.zw",
        password: "Bishop123!",
        label: "Unit Leader",
        description: "Bishop of Chitungwiza Ward",
        marker: "unit-leader-chitungwiza",
    },
    DemoCredential {
        email: "clerk.harare2@harare.zw",
        password: "Clerk123!",
        label: "Viewer",
        description: "Ward Clerk - Read-only access to Harare 2nd Ward",
        marker: "viewer-harare2",
    },
    DemoCredential {
        email: "ysa.president@harare.zw",
        password: "YSA123!",
        label: "Unit Leader",
        description: "YSA Branch President",
        marker: "ysa-leader",
    },
];

/// Fixture user directory keyed by marker.
#[derive(Debug, Clone, Default)]
pub struct DemoDirectory {
    users: Vec<(String, CurrentUser)>,
    credentials: Vec<DemoCredential>,
}

impl DemoDirectory {
    /// The built-in fixtures.
    #[must_use]
    pub fn builtin() -> Self {
        let users = vec![
            (
                "stake-leader".to_string(),
                fixture(
                    "demo-stake-leader",
                    "President Mukamuri",
                    "stake.leader@harare.zw",
                    Role::StakeLeader,
                    &STAKE_UNITS,
                ),
            ),
            (
                "unit-leader-harare1".to_string(),
                fixture(
                    "demo-bishop-harare1",
                    "Bishop Chigumira",
                    "bishop.harare1@harare.zw",
                    Role::UnitLeader,
                    &["harare-1st"],
                ),
            ),
            (
                "unit-leader-chitungwiza".to_string(),
                fixture(
                    "demo-bishop-chitungwiza",
                    "Bishop Mutasa",
                    "bishop.chitungwiza@harare.zw",
                    Role::UnitLeader,
                    &["chitungwiza"],
                ),
            ),
            (
                "viewer-harare2".to_string(),
                fixture(
                    "demo-clerk-harare2",
                    "Brother Nyamande",
                    "clerk.harare2@harare.zw",
                    Role::Viewer,
                    &["harare-2nd"],
                ),
            ),
            (
                "ysa-leader".to_string(),
                fixture(
                    "demo-ysa-president",
                    "President Madziva",
                    "ysa.president@harare.zw",
                    Role::UnitLeader,
                    &["ysa-branch"],
                ),
            ),
        ];
        Self {
            users,
            credentials: CREDENTIALS.to_vec(),
        }
    }

    /// A directory with no fixtures. Demo markers are then ignored.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the fixture for `marker`.
    #[must_use]
    pub fn lookup(&self, marker: &str) -> Option<&CurrentUser> {
        self.users
            .iter()
            .find(|(m, _)| m == marker)
            .map(|(_, user)| user)
    }

    /// Returns the marker matching these credentials.
    ///
    /// Emails compare case-insensitively, passwords exactly.
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&str> {
        self.credentials
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email.trim()) && c.password == password)
            .map(|c| c.marker)
    }

    #[must_use]
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|(m, _)| m.as_str())
    }

    #[must_use]
    pub fn credentials(&self) -> &[DemoCredential] {
        &self.credentials
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn fixture(id: &str, name: &str, email: &str, role: Role, units: &[&str]) -> CurrentUser {
    CurrentUser::new(id, name, role)
        .with_email(email)
        .with_units(units.iter().map(|u| UnitId::new(*u)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_fixtures() {
        let dir = DemoDirectory::builtin();
        assert_eq!(dir.markers().count(), 5);
        assert_eq!(dir.credentials().len(), 5);
    }

    #[test]
    fn stake_leader_fixture() {
        let dir = DemoDirectory::builtin();
        let user = dir.lookup("stake-leader").unwrap();
        assert_eq!(user.id().as_str(), "demo-stake-leader");
        assert_eq!(user.name(), "President Mukamuri");
        assert_eq!(user.role(), Role::StakeLeader);
        assert_eq!(user.units().len(), 7);
        assert_eq!(user.units()[0].as_str(), "harare-1st");
    }

    #[test]
    fn viewer_fixture() {
        let dir = DemoDirectory::builtin();
        let user = dir.lookup("viewer-harare2").unwrap();
        assert_eq!(user.role(), Role::Viewer);
        assert_eq!(user.email(), Some("clerk.harare2@harare.zw"));
        assert_eq!(user.units(), &[UnitId::new("harare-2nd")]);
    }

    #[test]
    fn unknown_marker() {
        assert!(DemoDirectory::builtin().lookup("bishop").is_none());
        assert!(DemoDirectory::empty().lookup("stake-leader").is_none());
    }

    #[test]
    fn every_credential_points_at_a_fixture() {
        let dir = DemoDirectory::builtin();
        for cred in dir.credentials() {
            let user = dir.lookup(cred.marker).unwrap();
            assert_eq!(user.email(), Some(cred.email));
            assert_eq!(
                dir.authenticate(cred.email, cred.password),
                Some(cred.marker)
            );
        }
    }

    #[test]
    fn authenticate_rejects_wrong_password() {
        let dir = DemoDirectory::builtin();
        assert_eq!(
            dir.authenticate("Bishop.Harare1@harare.zw", "Bishop123!"),
            Some("unit-leader-harare1")
        );
        assert_eq!(dir.authenticate("bishop.harare1@harare.zw", "bishop123!"), None);
        assert_eq!(dir.authenticate("nobody@harare.zw", "Bishop123!"), None);
    }

    #[test]
    fn password_is_not_serialized() {
        let json = serde_json::to_value(&DemoDirectory::builtin().credentials()[0]).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["marker"], "stake-leader");
    }
}
