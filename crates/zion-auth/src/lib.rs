//! Authorization model for Zion Track.
//!
//! Decides who the current user is and what that user may see: role
//! registry, permission evaluation, session resolution, navigation
//! filtering, sidebar state, page guards and working-unit selection.
//!
//! # Request Flow
//!
//! ```text
//! SessionResolver::resolve(demo_marker)
//!         │
//!         ▼ CurrentUser { role, units }
//!   ┌─────┴───────────────┬────────────────────┬───────────────────┐
//!   ▼                     ▼                    ▼                   ▼
//! filter_navigation   check_page         resolve_sidebar_open   select_unit
//! (visible menu)      (page access)      (initial layout)       (working unit)
//! ```
//!
//! | Component | Entry point | Backed by |
//! |-----------|-------------|-----------|
//! | Role registry | [`role_config`] | static table |
//! | Evaluator | [`has_any_permission`], [`PermissionPolicy`] | registry |
//! | Resolver | [`SessionResolver`] | [`AuthProvider`], [`ProfileDirectory`] |
//! | Navigation | [`filter_navigation`] | [`default_tree`] |
//! | Sidebar | [`resolve_sidebar_open`] | [`PreferenceStore`] |
//! | Page guard | [`check_page`] | [`page_guards`] |
//!
//! # Crate Architecture
//!
//! ```text
//! zion-types   (UserId, UnitId, Role, Permission)
//!     ↑
//! zion-auth    ◄── THIS CRATE
//!     ↑
//! zion-runtime (SessionStore impls, LocalBackend, Dashboard)
//! ```
//!
//! Trait definitions live here; the runtime crate provides the concrete
//! stores and backend.

pub mod collaborator;
pub mod demo;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod sidebar;
pub mod unit;

pub use collaborator::{
    AuthProvider, Backend, LookupError, Profile, ProfileDirectory, SessionIdentity,
    UnitAssignment, Unconfigured,
};
pub use demo::{DemoCredential, DemoDirectory};
pub use error::AuthError;
pub use guard::{check_page, guard_for, page_guards, GuardDecision, PageGuard};
pub use navigation::{default_tree, filter_navigation, NavGroup, NavItem, NavNode, NavTree};
pub use policy::{
    has_all_permissions, has_any_permission, has_permission, PermissionPolicy, RolePolicy,
};
pub use registry::{role_config, role_configs, unreachable_permissions, RoleColor, RoleConfig};
pub use resolver::SessionResolver;
pub use session::{CurrentUser, ResolutionState, ResolvedSession};
pub use sidebar::{reset_to_role_default, resolve_sidebar_open, PreferenceStore, SidebarPreference};
pub use unit::{allowed_units, select_unit};
