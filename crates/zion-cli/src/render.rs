//! Text output for the `zion` subcommands.

use zion_auth::{role_configs, DemoDirectory, GuardDecision, NavGroup, NavNode, NavTree};
use zion_runtime::DashboardView;

pub fn user(view: &DashboardView) {
    let user = &view.user;
    println!("Name:    {}", user.name());
    if let Some(email) = user.email() {
        println!("Email:   {email}");
    }
    println!("Role:    {} ({})", view.role.label, view.role.role);
    println!("Source:  {}", view.state);
    if !user.units().is_empty() {
        let units: Vec<&str> = user.units().iter().map(|u| u.as_str()).collect();
        println!("Units:   {}", units.join(", "));
    }
    if let Some(unit) = &view.selected_unit {
        println!("Working: {unit}");
    }
    println!("Sidebar: {}", sidebar_text(view.sidebar_open, view.sidebar_preference.is_set()));
    if let Some(expires) = view.expires_at {
        println!("Expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
    }
}

pub fn navigation(tree: &NavTree) {
    if tree.is_empty() {
        println!("(no navigation)");
        return;
    }
    for node in tree.nodes() {
        print_node(node, 0);
    }
}

fn print_node(node: &NavNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        NavNode::Item(item) => {
            let badge = item.badge().map(|b| format!(" [{b}]")).unwrap_or_default();
            println!("{indent}{:<24} {}{badge}", item.title(), item.url());
        }
        NavNode::Group(group) => print_group(group, depth),
    }
}

fn print_group(group: &NavGroup, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{}", group.title());
    for child in group.children() {
        print_node(child, depth + 1);
    }
}

pub fn decision(path: &str, decision: &GuardDecision) {
    match decision {
        GuardDecision::Granted => println!("{path}: granted"),
        GuardDecision::AuthenticationRequired => {
            println!("{path}: sign-in required");
        }
        GuardDecision::AccessDenied { role, required } => {
            let required: Vec<&str> = required.iter().map(|p| p.as_str()).collect();
            println!("{path}: access denied for {role} (needs one of: {})", required.join(", "));
        }
    }
}

pub fn sidebar(open: bool, explicit: bool) {
    println!("{}", sidebar_text(open, explicit));
}

fn sidebar_text(open: bool, explicit: bool) -> String {
    let state = if open { "open" } else { "closed" };
    let source = if explicit { "explicit" } else { "role default" };
    format!("{state} ({source})")
}

pub fn roles() {
    for config in role_configs() {
        println!("{} ({}, {})", config.label, config.role, config.color.as_str());
        println!("  {}", config.description);
        let sidebar = if config.default_sidebar_open { "open" } else { "closed" };
        println!("  sidebar: {sidebar}");
        for permission in config.permissions {
            println!("  - {permission}");
        }
    }
}

pub fn demo(demo: &DemoDirectory) {
    if demo.is_empty() {
        println!("Demo identities are disabled");
        return;
    }
    for credential in demo.credentials() {
        println!(
            "{:<30} {:<16} {} ({})",
            credential.email, credential.password, credential.label, credential.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_text_names_source() {
        assert_eq!(sidebar_text(true, false), "open (role default)");
        assert_eq!(sidebar_text(false, true), "closed (explicit)");
    }
}
