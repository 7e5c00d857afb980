//! Static route table.

use depor_core::Role;
use serde::Serialize;

/// Canonical path of the home page.
pub const HOME_PATH: &str = "/inicio";

/// A page the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    FichaJugador,
    ChichaJugador,
    SesionesMicrociclos,
    RendimientoFisico,
    SeguimientoCarga,
    EvolutivoTemporada,
    SemaforoControl,
    RendimientoColectivo,
    RendimientoIndividual,
    CapacidadFuncional,
    EstadoMedico,
    EstadoPsicologico,
    EstadoAntropometrico,
    Admin,
}

/// What a caller must hold to see a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated session.
    AnyAuthenticated,
    /// The given role, or any super-role.
    Role(Role),
    /// The literal `admin` role. Super-roles do not bypass this.
    AdminOnly,
}

impl Page {
    /// The single access rule attached to this page.
    pub fn requirement(&self) -> Requirement {
        match self {
            Page::Home => Requirement::AnyAuthenticated,
            Page::FichaJugador
            | Page::ChichaJugador
            | Page::SesionesMicrociclos
            | Page::RendimientoFisico
            | Page::SeguimientoCarga
            | Page::EvolutivoTemporada
            | Page::SemaforoControl
            | Page::RendimientoColectivo
            | Page::RendimientoIndividual => Requirement::Role(Role::Analista),
            Page::CapacidadFuncional => Requirement::Role(Role::Preparador),
            Page::EstadoMedico => Requirement::Role(Role::Medico),
            Page::EstadoPsicologico => Requirement::Role(Role::Psicologo),
            Page::EstadoAntropometrico => Requirement::Role(Role::Nutricion),
            Page::Admin => Requirement::AdminOnly,
        }
    }

    /// Heading shown at the top of the page.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Inicio",
            Page::FichaJugador => "Ficha de jugador",
            Page::ChichaJugador => "Chicha jugador",
            Page::SesionesMicrociclos => "Control proceso entrenamiento - Sesiones y microciclos",
            Page::RendimientoFisico => "Rendimiento físico",
            Page::SeguimientoCarga => "Seguimiento de carga",
            Page::EvolutivoTemporada => "Control proceso entrenamiento - Evolutivo temporada",
            Page::SemaforoControl => "Semáforo de control",
            Page::RendimientoColectivo => "Control proceso competición - Rendimiento colectivo",
            Page::RendimientoIndividual => "Control proceso competición - Rendimiento individual",
            Page::CapacidadFuncional => "Control estado funcional - Capacidad funcional",
            Page::EstadoMedico => "Control estado funcional - Médico",
            Page::EstadoPsicologico => "Control estado funcional - Psicológico",
            Page::EstadoAntropometrico => "Control estado funcional - Antropométrico",
            Page::Admin => "Administración",
        }
    }

    /// The first path in [`ROUTES`] that maps to this page.
    pub fn canonical_path(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|rule| rule.page == *self && rule.path != "/")
            .map(|rule| rule.path)
            .unwrap_or(HOME_PATH)
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub path: &'static str,
    pub page: Page,
}

const fn rule(path: &'static str, page: Page) -> RouteRule {
    RouteRule { path, page }
}

/// Every routable path. Paths are unique; lookups are exact.
pub const ROUTES: &[RouteRule] = &[
    rule("/", Page::Home),
    rule("/inicio", Page::Home),
    rule("/ficha-jugador", Page::FichaJugador),
    rule("/chicha-jugador", Page::ChichaJugador),
    rule("/control-proceso-entrenamiento/sesiones-microciclos", Page::SesionesMicrociclos),
    rule("/control-proceso-entrenamiento", Page::SesionesMicrociclos),
    rule("/rendimiento-fisico", Page::RendimientoFisico),
    rule("/seguimiento-carga", Page::SeguimientoCarga),
    rule("/control-proceso-entrenamiento/evolutivo-temporada", Page::EvolutivoTemporada),
    rule("/semaforo-control", Page::SemaforoControl),
    rule("/control-proceso-competicion/rendimiento-colectivo", Page::RendimientoColectivo),
    rule("/control-proceso-competicion/rendimiento-individual", Page::RendimientoIndividual),
    rule("/estado-funcional/capacidad", Page::CapacidadFuncional),
    rule("/estado-funcional/medico", Page::EstadoMedico),
    rule("/estado-funcional/psicologico", Page::EstadoPsicologico),
    rule("/estado-funcional/antropometrico", Page::EstadoAntropometrico),
    rule("/admin", Page::Admin),
];

/// Strip a trailing slash (except for the root) so `/admin/` matches `/admin`.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Find the page for a path. Unknown paths fall back to [`Page::Home`].
pub fn lookup(path: &str) -> Page {
    let path = normalize_path(path);
    ROUTES
        .iter()
        .find(|rule| rule.path == path)
        .map(|rule| rule.page)
        .unwrap_or(Page::Home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let mut seen = HashSet::new();
        for rule in ROUTES {
            assert!(seen.insert(rule.path), "duplicate route {}", rule.path);
        }
    }

    #[test]
    fn test_lookup_exact_and_trailing_slash() {
        assert_eq!(lookup("/estado-funcional/medico"), Page::EstadoMedico);
        assert_eq!(lookup("/estado-funcional/medico/"), Page::EstadoMedico);
        assert_eq!(lookup("/"), Page::Home);
        assert_eq!(lookup(""), Page::Home);
    }

    #[test]
    fn test_unknown_paths_fall_back_to_home() {
        assert_eq!(lookup("/jugadores"), Page::Home);
        assert_eq!(lookup("/admin/usuarios"), Page::Home);
        assert_eq!(lookup("/estado-funcional"), Page::Home);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(lookup("/control-proceso-entrenamiento"), Page::SesionesMicrociclos);
        assert_eq!(
            Page::SesionesMicrociclos.canonical_path(),
            "/control-proceso-entrenamiento/sesiones-microciclos"
        );
        assert_eq!(Page::Home.canonical_path(), HOME_PATH);
    }

    #[test]
    fn test_only_home_is_open_to_any_session() {
        for rule in ROUTES {
            let open = rule.page.requirement() == Requirement::AnyAuthenticated;
            assert_eq!(open, rule.page == Page::Home, "{}", rule.path);
        }
        assert_eq!(
            lookup("/ficha-jugador").requirement(),
            Requirement::Role(Role::Analista)
        );
        assert_eq!(
            lookup("/chicha-jugador").requirement(),
            Requirement::Role(Role::Analista)
        );
    }

    #[test]
    fn test_every_page_is_routable() {
        for rule in ROUTES {
            assert_eq!(lookup(rule.page.canonical_path()), rule.page);
        }
    }
}
