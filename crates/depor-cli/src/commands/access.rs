//! Access diagnostic.
//!
//! `depor access <PATH>` - Show what a caller with the given roles gets for a
//! path, and which sidebar entries they see.

use depor_core::{RoleSet, parse_role_list};
use depor_policy::{PageVariant, Sidebar, resolve};
use serde_json::json;

/// Arguments for `depor access`.
#[derive(Debug, Clone, Default)]
pub struct AccessArgs {
    pub path: String,
    pub roles: Option<String>,
    pub anonymous: bool,
    pub json: bool,
}

/// Print the access decision for a path.
pub fn run(args: &AccessArgs) -> anyhow::Result<()> {
    let roles = if args.anonymous {
        None
    } else {
        Some(parse_role_list(args.roles.as_deref().unwrap_or_default())?)
    };

    let report = evaluate(&args.path, roles.as_ref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        print!("{}", report.render());
    }
    Ok(())
}

/// Decision plus sidebar for one caller.
#[derive(Debug)]
pub struct AccessReport {
    pub path: String,
    pub variant: PageVariant,
    pub sidebar: Sidebar,
}

/// Evaluate a path without printing.
pub fn evaluate(path: &str, roles: Option<&RoleSet>) -> AccessReport {
    AccessReport {
        path: path.to_string(),
        variant: resolve(path, roles),
        sidebar: Sidebar::derive(roles, path),
    }
}

impl AccessReport {
    fn to_json(&self) -> serde_json::Value {
        json!({
            "path": self.path,
            "decision": self.variant,
            "sidebar": self.sidebar,
        })
    }

    fn render(&self) -> String {
        let decision = match self.variant {
            PageVariant::SessionExpired => "session expired (login required)".to_string(),
            PageVariant::Render(page) => format!("render '{}'", page.title()),
            PageVariant::NotAuthorized(page) => format!("not authorized for '{}'", page.title()),
        };

        let mut out = format!("{} -> {}\n", self.path, decision);
        if self.sidebar.is_empty() {
            out.push_str("sidebar: (empty)\n");
        } else {
            out.push_str("sidebar:\n");
            for entry in self.sidebar.entries() {
                let marker = if entry.active { "*" } else { " " };
                out.push_str(&format!("  {} {:<32} {}\n", marker, entry.label, entry.path));
            }
        }
        out
    }
}
