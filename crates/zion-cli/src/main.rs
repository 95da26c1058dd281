//! Zion Track CLI
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ZION_*`)
//! 3. Project config (`.zion/config.toml` in the project root)
//! 4. Global config (`~/.zion/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `ZION_DEBUG`: Enable debug logging (`true`/`false`)
//! - `ZION_DEMO`: Honor demo identities (`true`/`false`)
//! - `ZION_BACKEND_URL` / `ZION_BACKEND_KEY`: Backend connection
//! - `ZION_SEED_FILE`: Accounts for the local backend
//! - `ZION_SESSION_PATH`: Session record file
//! - `ZION_SESSION_MAX_AGE_DAYS`: Session lifetime
//! - `ZION_UNITS`: Comma separated unit catalog
//! - `ZION_PASSWORD`: Password for `zion login`

mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use zion_auth::{default_tree, filter_navigation, GuardDecision};
use zion_runtime::{
    CheckMode, ConfigError, ConfigLoader, ConfigResolver, Dashboard, LocalFileStore, ZionConfig,
};
use zion_types::{Permission, Role, UnitId};

/// Zion Track - church unit dashboard access
#[derive(Parser, Debug)]
#[command(name = "zion")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Custom session record path
    #[arg(long, global = true)]
    session_path: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(short, long, env = "ZION_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session record
    Logout,
    /// Show the current user
    Whoami,
    /// Show the navigation visible to the current user
    Nav {
        /// Preview another role instead of the current user's
        #[arg(long)]
        role: Option<Role>,
    },
    /// Check permissions of the current user (exit 1 when denied)
    Check {
        #[arg(required = true)]
        permissions: Vec<Permission>,
        /// Require every permission instead of any
        #[arg(long)]
        all: bool,
    },
    /// Check whether the current user may open a page (exit 1 when refused)
    Guard { path: String },
    /// Show or change the sidebar state
    Sidebar {
        #[command(subcommand)]
        action: Option<SidebarAction>,
    },
    /// Show or change the working unit
    Unit {
        #[command(subcommand)]
        action: Option<UnitAction>,
    },
    /// List roles and their permissions
    Roles,
    /// List demo sign-in credentials
    Demo,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum SidebarAction {
    Show,
    Open,
    Close,
    /// Forget the explicit choice and use the role default
    Reset,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum UnitAction {
    Show,
    Select { unit: UnitId },
}

/// CLI-based configuration resolver.
///
/// Loads file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    debug: bool,
    session_path: Option<PathBuf>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            debug: args.debug,
            session_path: args.session_path.clone(),
        }
    }

    fn resolve(&self) -> Result<ZionConfig, ConfigError> {
        let mut config = ConfigLoader::new()
            .with_project_root(self.project_root.clone())
            .load()?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut ZionConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref p) = self.session_path {
            config.session.path = Some(p.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver
        .resolve()
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    // stdout carries command output; logs go to stderr.
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    tracing::debug!(
        path = %resolver.project_root.display(),
        session = %config.session.resolved_path().display(),
        "Project root"
    );

    let dashboard = Dashboard::from_config(&config)?;
    let code = run(&dashboard, args.command, args.json).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Executes one subcommand and returns the process exit code.
async fn run(dashboard: &Dashboard<LocalFileStore>, command: Command, json: bool) -> Result<i32> {
    match command {
        Command::Login { email, password } => {
            let session = dashboard.sign_in(&email, &password).await?;
            if session.user.is_anonymous() {
                println!("Signed in, but no profile could be resolved; using {}", session.user.name());
            } else {
                println!(
                    "Signed in as {} ({})",
                    session.user.name(),
                    zion_auth::role_config(session.user.role()).label
                );
            }
        }
        Command::Logout => {
            dashboard.sign_out().await?;
            println!("Signed out");
        }
        Command::Whoami => {
            let view = dashboard.view(None).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render::user(&view);
            }
        }
        Command::Nav { role } => {
            let tree = match role {
                Some(role) => filter_navigation(role, default_tree()),
                None => dashboard.view(None).await?.navigation,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                render::navigation(&tree);
            }
        }
        Command::Check { permissions, all } => {
            let mode = if all { CheckMode::All } else { CheckMode::Any };
            let allowed = dashboard.check(&permissions, mode).await?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                return Ok(1);
            }
        }
        Command::Guard { path } => {
            let decision = dashboard.guard(&path).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                render::decision(&path, &decision);
            }
            if decision != GuardDecision::Granted {
                return Ok(1);
            }
        }
        Command::Sidebar { action } => {
            match action.unwrap_or(SidebarAction::Show) {
                SidebarAction::Show => {
                    let view = dashboard.view(None).await?;
                    render::sidebar(view.sidebar_open, view.sidebar_preference.is_set());
                }
                SidebarAction::Open => render::sidebar(dashboard.set_sidebar(true).await?, true),
                SidebarAction::Close => render::sidebar(dashboard.set_sidebar(false).await?, true),
                SidebarAction::Reset => render::sidebar(dashboard.reset_sidebar().await?, false),
            }
        }
        Command::Unit { action } => match action.unwrap_or(UnitAction::Show) {
            UnitAction::Show => {
                let view = dashboard.view(None).await?;
                match view.selected_unit {
                    Some(unit) => println!("{unit}"),
                    None => println!("No unit available"),
                }
            }
            UnitAction::Select { unit } => {
                let unit = dashboard.select_unit(unit).await?;
                println!("Selected {unit}");
            }
        },
        Command::Roles => {
            if json {
                println!("{}", serde_json::to_string_pretty(zion_auth::role_configs())?);
            } else {
                render::roles();
            }
        }
        Command::Demo => render::demo(dashboard.demo()),
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(debug: bool, session_path: Option<PathBuf>) -> CliConfigResolver {
        CliConfigResolver {
            project_root: PathBuf::from("."),
            debug,
            session_path,
        }
    }

    #[test]
    fn apply_defaults_no_overrides() {
        let mut config = ZionConfig::default();
        resolver(false, None).apply(&mut config);
        assert_eq!(config, ZionConfig::default());
    }

    #[test]
    fn apply_debug_override() {
        let mut config = ZionConfig::default();
        resolver(true, None).apply(&mut config);
        assert!(config.debug);
    }

    #[test]
    fn apply_session_path_override() {
        let mut config = ZionConfig::default();
        config.session.path = Some(PathBuf::from("/from/file.json"));
        resolver(false, Some(PathBuf::from("/tmp/cli.json"))).apply(&mut config);
        assert_eq!(config.session.path, Some(PathBuf::from("/tmp/cli.json")));
    }

    #[test]
    fn false_flags_preserve_loader_values() {
        let mut config = ZionConfig::default();
        config.debug = true;
        resolver(false, None).apply(&mut config);
        assert!(config.debug);
    }

    #[test]
    fn from_args_with_all_flags() {
        let args = Args::try_parse_from([
            "zion",
            "-d",
            "-C",
            "/srv/zion",
            "--session-path",
            "/tmp/s.json",
            "whoami",
        ])
        .expect("should parse args");
        let resolver = CliConfigResolver::from_args(&args);
        assert!(resolver.debug);
        assert_eq!(resolver.project_root, PathBuf::from("/srv/zion"));
        assert_eq!(resolver.session_path, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn parses_typed_arguments() {
        let args = Args::try_parse_from(["zion", "check", "view-dashboard", "edit-own-data", "--all"])
            .expect("should parse check");
        match args.command {
            Command::Check { permissions, all } => {
                assert_eq!(permissions, vec![Permission::ViewDashboard, Permission::EditOwnData]);
                assert!(all);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let args = Args::try_parse_from(["zion", "nav", "--role", "viewer", "--json"])
            .expect("should parse nav");
        assert!(args.json);
        assert!(matches!(args.command, Command::Nav { role: Some(Role::Viewer) }));

        let args = Args::try_parse_from(["zion", "unit", "select", "norton"])
            .expect("should parse unit select");
        assert!(matches!(
            args.command,
            Command::Unit { action: Some(UnitAction::Select { ref unit }) } if unit.as_str() == "norton"
        ));
    }

    #[test]
    fn rejects_unknown_permission() {
        assert!(Args::try_parse_from(["zion", "check", "launch-rockets"]).is_err());
        assert!(Args::try_parse_from(["zion", "nav", "--role", "admin"]).is_err());
    }
}
