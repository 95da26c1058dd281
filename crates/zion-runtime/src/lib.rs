//! Zion Track runtime.
//!
//! Concrete pieces around the authorization model in `zion-auth`:
//! layered configuration, session record persistence, the seed-file backend
//! and the [`Dashboard`] facade that the `zion` binary drives.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  zion-types : UserId, UnitId, Role, Permission, ErrorCode │
//! │  zion-auth  : registry, resolver, navigation, guards     │
//! └──────────────────────────────────────────────────────────┘
//!                              ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Runtime Layer (THIS CRATE)               │
//! ├──────────────────────────────────────────────────────────┤
//! │  config/    : ZionConfig, ConfigLoader, ConfigResolver   │
//! │  store/     : SessionRecord, SessionStore impls          │
//! │  backend    : LocalBackend, RecordedSession              │
//! │  dashboard/ : Dashboard, DashboardView                   │
//! └──────────────────────────────────────────────────────────┘
//!                              ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │  zion-cli   : `zion` binary                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`config`] - Configuration Management
//!
//! - [`ZionConfig`]: merged settings
//! - [`ConfigLoader`]: defaults, global file, project file, environment
//! - [`ConfigResolver`]: final override layer (CLI flags)
//!
//! ## [`store`] - Session Persistence
//!
//! - [`SessionRecord`](store::SessionRecord): who is signed in plus UI choices
//! - [`LocalFileStore`](store::LocalFileStore): JSON file
//! - [`MemoryStore`](store::MemoryStore): in-process
//!
//! ## [`backend`] - Local Backend
//!
//! - [`LocalBackend`]: seed-file accounts, profiles and unit assignments
//!
//! ## [`dashboard`] - Facade
//!
//! - [`Dashboard`]: sign-in, sign-out and per-request view derivation

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod store;

pub use backend::{BackendError, LocalBackend, RecordedSession, SeedAccount};
pub use config::{ConfigError, ConfigLoader, ConfigResolver, NoOpResolver, ZionConfig};
pub use dashboard::{CheckMode, Dashboard, DashboardError, DashboardView, PageView, SignInError};
pub use store::{LocalFileStore, MemoryStore, SessionRecord, SessionStore, StorageError};
