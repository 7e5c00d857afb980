//! Depor access policy.
//!
//! A static route table maps every known path to a [`Page`], and every page to
//! exactly one [`Requirement`]. [`resolve`] turns a path plus the caller's role
//! set into a [`PageVariant`]. The sidebar ([`Sidebar::derive`]) is computed
//! from the same function, so a navigation entry is visible exactly when
//! following it would render the page.

pub mod access;
pub mod nav;
pub mod route;

pub use access::{PageVariant, admits, resolve};
pub use nav::{NAV, NavEntry, NavItem, Sidebar, SidebarEntry, SidebarItem};
pub use route::{HOME_PATH, Page, ROUTES, Requirement, RouteRule, lookup, normalize_path};
