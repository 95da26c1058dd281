//! Navigation tree and role-based filtering.
//!
//! The sidebar is a tree of [`NavNode`]s: leaf [`NavItem`]s pointing at a
//! page, and [`NavGroup`]s holding ordered children. Each item carries an
//! "any of" permission list; a group may carry an optional gate of its own.
//!
//! ```text
//! NavTree
//!  ├── Group "Navigation"
//!  │    ├── Item "Dashboard"     [view-dashboard]
//!  │    └── Item "Data Entry"    [edit-all-data | edit-own-data]
//!  ├── Group "Area Priorities"
//!  │    └── Group "Self Reliance" gate [view-area-priorities]
//!  │         └── Item ...
//!  └── ...
//! ```
//!
//! [`filter_navigation`] returns a new tree containing only what a role may
//! see. Groups that end up with no visible children are dropped.

use crate::has_any_permission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use zion_types::{Permission, Role};

/// A navigable page entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    title: String,
    icon: String,
    url: String,
    required_permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl NavItem {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        icon: impl Into<String>,
        url: impl Into<String>,
        required_permissions: impl Into<Vec<Permission>>,
    ) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            url: url.into(),
            required_permissions: required_permissions.into(),
            badge: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Icon name, resolved to a glyph by the presentation layer.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn required_permissions(&self) -> &[Permission] {
        &self.required_permissions
    }

    #[must_use]
    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Visible iff `role` holds any of the required permissions.
    ///
    /// An item with an empty list is never visible.
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        has_any_permission(role, &self.required_permissions)
    }
}

/// A titled, ordered collection of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    title: String,
    children: Vec<NavNode>,
    /// `None` means the group has no gate of its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required_permissions: Option<Vec<Permission>>,
    #[serde(default)]
    collapsible: bool,
}

impl NavGroup {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
            required_permissions: None,
            collapsible: false,
        }
    }

    #[must_use]
    pub fn item(mut self, item: NavItem) -> Self {
        self.children.push(NavNode::Item(item));
        self
    }

    #[must_use]
    pub fn group(mut self, group: NavGroup) -> Self {
        self.children.push(NavNode::Group(group));
        self
    }

    /// Gates the whole group on "any of" `permissions`.
    #[must_use]
    pub fn gated(mut self, permissions: impl Into<Vec<Permission>>) -> Self {
        self.required_permissions = Some(permissions.into());
        self
    }

    #[must_use]
    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        &self.children
    }

    #[must_use]
    pub fn required_permissions(&self) -> Option<&[Permission]> {
        self.required_permissions.as_deref()
    }

    #[must_use]
    pub fn is_collapsible(&self) -> bool {
        self.collapsible
    }

    fn gate_passes(&self, role: Role) -> bool {
        self.required_permissions
            .as_deref()
            .map_or(true, |gate| has_any_permission(role, gate))
    }
}

/// Node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavNode {
    Item(NavItem),
    Group(NavGroup),
}

/// Ordered top-level navigation nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavTree {
    nodes: Vec<NavNode>,
}

impl NavTree {
    #[must_use]
    pub fn new(nodes: Vec<NavNode>) -> Self {
        Self { nodes }
    }

    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All items in depth-first order.
    #[must_use]
    pub fn items(&self) -> Vec<&NavItem> {
        let mut out = Vec::new();
        collect_items(&self.nodes, &mut out);
        out
    }

    /// First item whose url equals `url`.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<&NavItem> {
        self.items().into_iter().find(|item| item.url == url)
    }

    /// Every permission referenced by an item or a group gate.
    #[must_use]
    pub fn referenced_permissions(&self) -> BTreeSet<Permission> {
        let mut out = BTreeSet::new();
        collect_permissions(&self.nodes, &mut out);
        out
    }
}

fn collect_items<'a>(nodes: &'a [NavNode], out: &mut Vec<&'a NavItem>) {
    for node in nodes {
        match node {
            NavNode::Item(item) => out.push(item),
            NavNode::Group(group) => collect_items(&group.children, out),
        }
    }
}

fn collect_permissions(nodes: &[NavNode], out: &mut BTreeSet<Permission>) {
    for node in nodes {
        match node {
            NavNode::Item(item) => out.extend(item.required_permissions.iter().copied()),
            NavNode::Group(group) => {
                if let Some(gate) = &group.required_permissions {
                    out.extend(gate.iter().copied());
                }
                collect_permissions(&group.children, out);
            }
        }
    }
}

/// Returns the subset of `tree` visible to `role`.
///
/// - items are kept iff the role satisfies "any of" their list
/// - groups are kept iff their gate passes and at least one child survives
/// - relative order is preserved at every level
///
/// Filtering an already filtered tree for the same role returns it unchanged.
///
/// # Example
///
/// ```
/// use zion_auth::{default_tree, filter_navigation};
/// use zion_types::Role;
///
/// let viewer = filter_navigation(Role::Viewer, default_tree());
/// assert!(viewer.find("/units").is_some());
/// assert!(viewer.find("/data-entry").is_none());
/// ```
#[must_use]
pub fn filter_navigation(role: Role, tree: &NavTree) -> NavTree {
    let filtered = NavTree {
        nodes: filter_nodes(role, &tree.nodes),
    };
    tracing::debug!(
        role = %role,
        total = tree.items().len(),
        visible = filtered.items().len(),
        "navigation filtered"
    );
    filtered
}

fn filter_nodes(role: Role, nodes: &[NavNode]) -> Vec<NavNode> {
    nodes
        .iter()
        .filter_map(|node| match node {
            NavNode::Item(item) => item.is_visible_to(role).then(|| NavNode::Item(item.clone())),
            NavNode::Group(group) => filter_group(role, group).map(NavNode::Group),
        })
        .collect()
}

fn filter_group(role: Role, group: &NavGroup) -> Option<NavGroup> {
    if !group.gate_passes(role) {
        return None;
    }
    let children = filter_nodes(role, &group.children);
    if children.is_empty() {
        return None;
    }
    Some(NavGroup {
        title: group.title.clone(),
        children,
        required_permissions: group.required_permissions.clone(),
        collapsible: group.collapsible,
    })
}

/// The application's navigation tree. Built on first use.
#[must_use]
pub fn default_tree() -> &'static NavTree {
    static TREE: OnceLock<NavTree> = OnceLock::new();
    TREE.get_or_init(build_default_tree)
}

fn build_default_tree() -> NavTree {
    use Permission::*;

    let main = NavGroup::new("Navigation")
        .item(
            NavItem::new("Dashboard", "home", "/", [ViewDashboard])
                .with_description("Overview of key metrics and indicators"),
        )
        .item(
            NavItem::new("Data Entry", "file-text", "/data-entry", [EditAllData, EditOwnData])
                .with_description("Submit monthly and quarterly data"),
        )
        .item(
            NavItem::new("Analytics", "bar-chart-3", "/analytics", [ViewAnalytics])
                .with_description("Detailed insights and trends"),
        )
        .item(
            NavItem::new("Stake Rollup", "bar-chart-3", "/rollup", [ViewAnalytics])
                .with_description("Compare units and export summaries"),
        )
        .item(
            NavItem::new(
                "Units",
                "users",
                "/units",
                [ViewAllUnits, ViewOwnUnit, ViewAssignedUnits],
            )
            .with_description("Manage and view unit information"),
        );

    let leadership = NavGroup::new("Stake Leadership")
        .item(
            NavItem::new(
                "Advanced Analytics",
                "bar-chart-3",
                "/advanced-analytics",
                [ViewAdvancedAnalytics],
            )
            .with_description("Comprehensive stake-wide analysis"),
        )
        .item(
            NavItem::new("User Management", "user-check", "/user-management", [ManageUsers])
                .with_description("Manage user roles and permissions"),
        )
        .item(
            NavItem::new("Goal Management", "target", "/goal-management", [ManageGoals])
                .with_description("Set and track stake goals"),
        )
        .item(
            NavItem::new("Settings", "settings", "/settings", [ManageUsers])
                .with_description("System configuration and preferences"),
        );

    let priority = |title: &str, icon: &str, url: &str| {
        NavItem::new(title, icon, url, [ViewAreaPriorities])
    };
    let area = NavGroup::new("Area Priorities")
        .group(
            NavGroup::new("Self Reliance")
                .gated([ViewAreaPriorities])
                .collapsible()
                .item(priority("Back to Gospel Basics", "book-open", "/priorities/gospel-basics"))
                .item(priority("My Path for Self Reliance", "target", "/priorities/self-reliance-path")),
        )
        .group(
            NavGroup::new("Sharing the Gospel")
                .gated([ViewAreaPriorities])
                .collapsible()
                .item(priority("Love, Share, and Invite", "award", "/priorities/love-share-invite"))
                .item(priority("My Covenant Path", "map-pin", "/priorities/covenant-path")),
        )
        .group(
            NavGroup::new("The House of the Lord")
                .gated([ViewAreaPriorities])
                .collapsible()
                .item(priority("Recommended to the Lord", "award", "/priorities/temple-recommends"))
                .item(priority("My Family Booklet", "book-open", "/priorities/family-booklet")),
        );

    let management = NavGroup::new("Management").group(
        NavGroup::new("Area Management")
            .gated([ManageAreaPriorities])
            .collapsible()
            .item(NavItem::new(
                "Priority Settings",
                "settings",
                "/management/priorities",
                [ManageAreaPriorities],
            ))
            .item(NavItem::new(
                "Goal Templates",
                "target",
                "/management/goal-templates",
                [ManageAreaPriorities],
            )),
    );

    NavTree::new(vec![
        NavNode::Group(main),
        NavNode::Group(leadership),
        NavNode::Group(area),
        NavNode::Group(management),
    ])
}
