//! Core types for Zion Track.
//!
//! Leaf crate of the workspace: identifiers, the closed [`Role`] and
//! [`Permission`] enumerations, and the [`ErrorCode`] convention shared by
//! every error type.
//!
//! ```text
//! zion-types  (UserId, UnitId, Role, Permission, ErrorCode)  ◄── HERE
//!     ↑
//! zion-auth   (registry, evaluator, resolver, navigation, sidebar)
//!     ↑
//! zion-runtime (config, session store, local backend, dashboard)
//!     ↑
//! zion-cli    (`zion` binary)
//! ```
//!
//! # Example
//!
//! ```
//! use zion_types::{Permission, Role, UnitId, UserId};
//!
//! let role: Role = "stake-leader".parse().unwrap();
//! let perm: Permission = "manage-users".parse().unwrap();
//! assert_eq!(role, Role::StakeLeader);
//! assert_eq!(perm, Permission::ManageUsers);
//!
//! let user = UserId::new("demo-stake-leader");
//! let unit = UnitId::new("harare-1st");
//! assert_eq!(format!("{user}@{unit}"), "demo-stake-leader@harare-1st");
//! ```

mod error;
mod id;
mod permission;
mod role;

pub use error::{assert_error_code, ErrorCode, ParseError};
pub use id::{UnitId, UserId, ANONYMOUS_USER_ID};
pub use permission::Permission;
pub use role::Role;
