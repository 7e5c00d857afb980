//! Route admission.
//!
//! `admits` is the only place the super-role rule lives. Routing and the
//! sidebar both go through it.

use crate::route::{Page, Requirement, lookup};
use depor_core::{Role, RoleSet};
use serde::Serialize;

/// Outcome of resolving a path for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "page", rename_all = "snake_case")]
pub enum PageVariant {
    /// No authenticated session; nothing protected may render.
    SessionExpired,
    /// The caller may see the page.
    Render(Page),
    /// Authenticated, but the role set does not satisfy the page.
    NotAuthorized(Page),
}

impl PageVariant {
    pub fn is_allowed(&self) -> bool {
        matches!(self, PageVariant::Render(_))
    }

    /// The page this variant refers to, if any.
    pub fn page(&self) -> Option<Page> {
        match self {
            PageVariant::SessionExpired => None,
            PageVariant::Render(page) | PageVariant::NotAuthorized(page) => Some(*page),
        }
    }
}

/// Whether an authenticated role set satisfies a requirement.
pub fn admits(requirement: Requirement, roles: &RoleSet) -> bool {
    match requirement {
        Requirement::AnyAuthenticated => true,
        Requirement::AdminOnly => roles.contains(&Role::Admin),
        Requirement::Role(role) => roles.contains(&role) || roles.iter().any(Role::is_super),
    }
}

/// Resolve a path for a caller. `None` means the caller is not authenticated.
pub fn resolve(path: &str, roles: Option<&RoleSet>) -> PageVariant {
    let Some(roles) = roles else {
        return PageVariant::SessionExpired;
    };

    let page = lookup(path);
    if admits(page.requirement(), roles) {
        PageVariant::Render(page)
    } else {
        tracing::debug!(path = %path, page = ?page, "access denied by role policy");
        PageVariant::NotAuthorized(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ROUTES;

    fn roles(list: &[Role]) -> RoleSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_unauthenticated_always_session_expired() {
        for rule in ROUTES {
            assert_eq!(resolve(rule.path, None), PageVariant::SessionExpired);
        }
        assert_eq!(resolve("/whatever", None), PageVariant::SessionExpired);
    }

    #[test]
    fn test_super_roles_pass_everything_but_admin() {
        for super_role in [Role::Admin, Role::Direccion] {
            let set = roles(&[super_role]);
            for rule in ROUTES {
                let variant = resolve(rule.path, Some(&set));
                if rule.page == Page::Admin {
                    assert_eq!(variant.is_allowed(), super_role == Role::Admin);
                } else {
                    assert!(variant.is_allowed(), "{super_role} denied {}", rule.path);
                }
            }
        }
    }

    #[test]
    fn test_direccion_denied_admin() {
        let set = roles(&[Role::Direccion, Role::Medico]);
        assert_eq!(
            resolve("/admin", Some(&set)),
            PageVariant::NotAuthorized(Page::Admin)
        );
    }

    #[test]
    fn test_roleless_session_sees_only_home() {
        let empty = RoleSet::new();
        for rule in ROUTES {
            let variant = resolve(rule.path, Some(&empty));
            assert_eq!(variant.is_allowed(), rule.page == Page::Home, "{}", rule.path);
        }
    }

    #[test]
    fn test_non_super_without_required_role_denied() {
        for rule in ROUTES {
            let Requirement::Role(required) = rule.page.requirement() else {
                continue;
            };
            let others: RoleSet = Role::ALL
                .into_iter()
                .filter(|r| *r != required && !r.is_super())
                .collect();
            assert_eq!(
                resolve(rule.path, Some(&others)),
                PageVariant::NotAuthorized(rule.page)
            );
        }
    }

    #[test]
    fn test_medico_example() {
        let set = roles(&[Role::Medico]);
        assert!(resolve("/estado-funcional/medico", Some(&set)).is_allowed());
        assert!(!resolve("/estado-funcional/antropometrico", Some(&set)).is_allowed());
        assert!(!resolve("/admin", Some(&set)).is_allowed());
        assert!(resolve("/inicio", Some(&set)).is_allowed());
    }

    #[test]
    fn test_unknown_path_renders_home() {
        let set = roles(&[Role::Nutricion]);
        assert_eq!(resolve("/no-existe", Some(&set)), PageVariant::Render(Page::Home));
    }

    #[test]
    fn test_variant_page() {
        assert_eq!(PageVariant::SessionExpired.page(), None);
        assert_eq!(
            PageVariant::NotAuthorized(Page::Admin).page(),
            Some(Page::Admin)
        );
    }
}
