//! Sidebar visibility derivation.
//!
//! The sidebar has no state of its own. Each entry is shown iff
//! [`resolve`] would render its target for the same role set.

use crate::access::{PageVariant, resolve};
use crate::route::{Page, lookup};
use depor_core::RoleSet;
use serde::Serialize;

/// A link in the static navigation catalog.
#[derive(Debug, Clone, Copy)]
pub struct NavEntry {
    pub label: &'static str,
    /// Font Awesome icon name, without the `fa-` prefix.
    pub icon: &'static str,
    pub page: Page,
}

/// Top-level sidebar item: a plain link or a collapsible group.
#[derive(Debug, Clone, Copy)]
pub enum NavItem {
    Link(NavEntry),
    Group {
        key: &'static str,
        label: &'static str,
        icon: &'static str,
        entries: &'static [NavEntry],
    },
}

const fn entry(label: &'static str, icon: &'static str, page: Page) -> NavEntry {
    NavEntry { label, icon, page }
}

/// The navigation catalog, in display order.
pub const NAV: &[NavItem] = &[
    NavItem::Link(entry("Inicio", "home", Page::Home)),
    NavItem::Link(entry("Semáforo de control", "traffic-light", Page::SemaforoControl)),
    NavItem::Group {
        key: "crc",
        label: "Control proceso competición",
        icon: "trophy",
        entries: &[
            entry("Rendimiento colectivo", "users", Page::RendimientoColectivo),
            entry("Rendimiento individual", "user", Page::RendimientoIndividual),
        ],
    },
    NavItem::Group {
        key: "cpe",
        label: "Control proceso entrenamiento",
        icon: "dumbbell",
        entries: &[
            entry("Sesiones-microciclos", "clipboard-list", Page::SesionesMicrociclos),
            entry("Rendimiento físico", "running", Page::RendimientoFisico),
            entry("Seguimiento de carga", "weight-hanging", Page::SeguimientoCarga),
            entry("Evolutivo temporada", "chart-line", Page::EvolutivoTemporada),
        ],
    },
    NavItem::Group {
        key: "cef",
        label: "Control estado funcional",
        icon: "heartbeat",
        entries: &[
            entry("Médico", "user-md", Page::EstadoMedico),
            entry("Antropométrico", "apple-alt", Page::EstadoAntropometrico),
            entry("Psicológico", "brain", Page::EstadoPsicologico),
            entry("Capacidad funcional", "running", Page::CapacidadFuncional),
        ],
    },
    NavItem::Link(entry("Ficha jugador", "id-card", Page::FichaJugador)),
    NavItem::Link(entry("Administración", "cog", Page::Admin)),
];

/// A visible sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub label: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
    pub page: Page,
    /// The link points at the page currently displayed.
    pub active: bool,
}

/// A visible top-level sidebar item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarItem {
    Link(SidebarEntry),
    Group {
        key: &'static str,
        label: &'static str,
        icon: &'static str,
        /// The group contains the active entry and renders open.
        expanded: bool,
        entries: Vec<SidebarEntry>,
    },
}

/// The sidebar as seen by one caller on one path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub items: Vec<SidebarItem>,
}

impl Sidebar {
    /// Compute visibility, highlighting and expansion for a caller.
    pub fn derive(roles: Option<&RoleSet>, current_path: &str) -> Self {
        let current = lookup(current_path);

        let visible = |nav: &NavEntry| -> Option<SidebarEntry> {
            let path = nav.page.canonical_path();
            match resolve(path, roles) {
                PageVariant::Render(page) if page == nav.page => Some(SidebarEntry {
                    label: nav.label,
                    icon: nav.icon,
                    path,
                    page: nav.page,
                    active: nav.page == current,
                }),
                _ => None,
            }
        };

        let items = NAV
            .iter()
            .filter_map(|item| match item {
                NavItem::Link(nav) => visible(nav).map(SidebarItem::Link),
                NavItem::Group {
                    key,
                    label,
                    icon,
                    entries,
                } => {
                    let entries: Vec<SidebarEntry> = entries.iter().filter_map(&visible).collect();
                    if entries.is_empty() {
                        return None;
                    }
                    Some(SidebarItem::Group {
                        key: *key,
                        label: *label,
                        icon: *icon,
                        expanded: entries.iter().any(|e| e.active),
                        entries,
                    })
                }
            })
            .collect();

        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every visible link, groups flattened, in display order.
    pub fn entries(&self) -> impl Iterator<Item = &SidebarEntry> {
        self.items.iter().flat_map(|item| match item {
            SidebarItem::Link(entry) => std::slice::from_ref(entry).iter(),
            SidebarItem::Group { entries, .. } => entries.iter(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ROUTES;
    use depor_core::Role;

    fn roles(list: &[Role]) -> RoleSet {
        list.iter().copied().collect()
    }

    /// Every subset of the role catalog.
    fn all_role_sets() -> Vec<RoleSet> {
        (0u32..1 << Role::ALL.len())
            .map(|mask| {
                Role::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, r)| r)
                    .collect()
            })
            .collect()
    }

    fn nav_pages() -> Vec<Page> {
        NAV.iter()
            .flat_map(|item| match item {
                NavItem::Link(nav) => vec![nav.page],
                NavItem::Group { entries, .. } => entries.iter().map(|e| e.page).collect(),
            })
            .collect()
    }

    #[test]
    fn test_anonymous_sees_nothing() {
        assert!(Sidebar::derive(None, "/inicio").is_empty());
    }

    #[test]
    fn test_visibility_matches_policy_for_every_role_set() {
        for set in all_role_sets() {
            let sidebar = Sidebar::derive(Some(&set), "/");
            let shown: Vec<Page> = sidebar.entries().map(|e| e.page).collect();

            for page in nav_pages() {
                let allowed = resolve(page.canonical_path(), Some(&set)).is_allowed();
                assert_eq!(
                    shown.contains(&page),
                    allowed,
                    "roles {:?}, page {:?}",
                    set,
                    page
                );
            }
        }
    }

    #[test]
    fn test_every_page_but_chicha_has_a_nav_entry() {
        let pages = nav_pages();
        for rule in ROUTES {
            if rule.page == Page::ChichaJugador {
                assert!(!pages.contains(&rule.page));
                continue;
            }
            assert!(pages.contains(&rule.page), "{:?} has no nav entry", rule.page);
        }
    }

    #[test]
    fn test_group_hidden_when_no_entry_visible() {
        let sidebar = Sidebar::derive(Some(&roles(&[Role::Medico])), "/inicio");
        let groups: Vec<&str> = sidebar
            .items
            .iter()
            .filter_map(|item| match item {
                SidebarItem::Group { key, entries, .. } => {
                    assert_eq!(entries.len(), 1);
                    Some(*key)
                }
                SidebarItem::Link(_) => None,
            })
            .collect();
        assert_eq!(groups, vec!["cef"]);
    }

    #[test]
    fn test_active_entry_expands_its_group() {
        let set = roles(&[Role::Analista]);
        let sidebar = Sidebar::derive(Some(&set), "/control-proceso-entrenamiento/evolutivo-temporada");

        for item in &sidebar.items {
            if let SidebarItem::Group {
                key,
                expanded,
                entries,
                ..
            } = item
            {
                assert_eq!(*expanded, *key == "cpe");
                let active: Vec<&str> = entries.iter().filter(|e| e.active).map(|e| e.label).collect();
                if *key == "cpe" {
                    assert_eq!(active, vec!["Evolutivo temporada"]);
                } else {
                    assert!(active.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_alias_path_highlights_canonical_entry() {
        let set = roles(&[Role::Direccion]);
        let sidebar = Sidebar::derive(Some(&set), "/control-proceso-entrenamiento");
        let active: Vec<&str> = sidebar.entries().filter(|e| e.active).map(|e| e.path).collect();
        assert_eq!(active, vec!["/control-proceso-entrenamiento/sesiones-microciclos"]);
    }

    #[test]
    fn test_admin_entry_only_for_admin() {
        let has_admin = |set: &RoleSet| {
            Sidebar::derive(Some(set), "/")
                .entries()
                .any(|e| e.page == Page::Admin)
        };
        assert!(has_admin(&roles(&[Role::Admin])));
        assert!(!has_admin(&roles(&[Role::Direccion])));
    }
}
