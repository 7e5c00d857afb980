//! Page bodies for dashboard views.
//!
//! Report pages are static informational panels. Only the admin page has a
//! form behind it.

use crate::templates::{AlertKind, alert, badge, bare_page, card, checkboxes, empty_state, input};
use depor_policy::Page;

/// Shown in place of a page the caller's roles do not cover.
pub const NOT_AUTHORIZED_MESSAGE: &str = "No tienes permisos para acceder a esta sección.";

/// Notice on the login form when a presented session is no longer valid.
pub const SESSION_EXPIRED_MESSAGE: &str = "Sesión expirada. Por favor, vuelve a iniciar sesión.";

/// Body of the 503 page.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Servicio no disponible";

// =============================================================================
// Report pages
// =============================================================================

struct Panel {
    icon: &'static str,
    intro: &'static str,
    sections: &'static [(&'static str, &'static str)],
}

fn panel(page: Page) -> Panel {
    match page {
        Page::Home => Panel {
            icon: "home",
            intro: "Área de rendimiento del club. Usa el menú lateral para acceder a los informes disponibles para tus roles.",
            sections: &[
                ("Control proceso entrenamiento", "Sesiones, microciclos, carga y evolución de la temporada."),
                ("Control proceso competición", "Rendimiento colectivo e individual en competición."),
                ("Control estado funcional", "Estado médico, antropométrico, psicológico y capacidad funcional."),
            ],
        },
        Page::FichaJugador | Page::ChichaJugador => Panel {
            icon: "id-card",
            intro: "Ficha individual del jugador con datos de perfil, carga acumulada y disponibilidad.",
            sections: &[
                ("Perfil", "Demarcación, dorsal y datos básicos."),
                ("Carga acumulada", "Minutos y volumen de las últimas semanas."),
            ],
        },
        Page::SesionesMicrociclos => Panel {
            icon: "clipboard-list",
            intro: "Resumen de sesiones de entrenamiento agrupadas por microciclo.",
            sections: &[
                ("Microciclo actual", "Distancia total, alta intensidad y aceleraciones por sesión."),
                ("Comparativa", "Microciclo actual frente a la media de la temporada."),
            ],
        },
        Page::RendimientoFisico => Panel {
            icon: "running",
            intro: "Métricas físicas de entrenamientos y partidos.",
            sections: &[
                ("Distancias", "Distancia total y por franjas de velocidad."),
                ("Esfuerzos", "Sprints, aceleraciones y deceleraciones."),
            ],
        },
        Page::SeguimientoCarga => Panel {
            icon: "weight-hanging",
            intro: "Seguimiento de la carga externa e interna por jugador.",
            sections: &[
                ("Carga semanal", "Volumen e intensidad acumulados por semana."),
                ("Ratio aguda:crónica", "Relación entre la carga reciente y la habitual."),
            ],
        },
        Page::EvolutivoTemporada => Panel {
            icon: "chart-line",
            intro: "Evolución de las métricas de entrenamiento a lo largo de la temporada.",
            sections: &[("Tendencias", "Medias móviles por microciclo y por jugador.")],
        },
        Page::SemaforoControl => Panel {
            icon: "traffic-light",
            intro: "Semáforo de control de la plantilla según umbrales individuales.",
            sections: &[
                ("Verde", "Valores dentro de rango."),
                ("Amarillo", "Desviación moderada respecto al umbral."),
                ("Rojo", "Desviación alta; revisar con el cuerpo técnico."),
            ],
        },
        Page::RendimientoColectivo => Panel {
            icon: "users",
            intro: "Indicadores de rendimiento colectivo en competición.",
            sections: &[
                ("Partidos", "Resultados y métricas de equipo por jornada."),
                ("Estilo de juego", "Posesión, presión y transiciones."),
            ],
        },
        Page::RendimientoIndividual => Panel {
            icon: "user",
            intro: "Indicadores individuales de rendimiento en competición.",
            sections: &[("Jugadores", "Minutos, acciones y métricas físicas por partido.")],
        },
        Page::CapacidadFuncional => Panel {
            icon: "running",
            intro: "Valoraciones de capacidad funcional.",
            sections: &[("Test funcionales", "Fuerza, salto y movilidad.")],
        },
        Page::EstadoMedico => Panel {
            icon: "user-md",
            intro: "Estado médico de la plantilla.",
            sections: &[
                ("Disponibilidad", "Jugadores disponibles, en recuperación y de baja."),
                ("Lesiones", "Historial y seguimiento de lesiones."),
            ],
        },
        Page::EstadoPsicologico => Panel {
            icon: "brain",
            intro: "Seguimiento del estado psicológico.",
            sections: &[("Bienestar", "Cuestionarios de bienestar y percepción del esfuerzo.")],
        },
        Page::EstadoAntropometrico => Panel {
            icon: "apple-alt",
            intro: "Mediciones antropométricas y nutrición.",
            sections: &[
                ("Composición corporal", "Peso, pliegues y porcentaje graso."),
                ("Nutrición", "Pautas y seguimiento nutricional."),
            ],
        },
        Page::Admin => Panel {
            icon: "cog",
            intro: "Alta de usuarios y asignación de roles.",
            sections: &[],
        },
    }
}

/// Static body for a report page.
pub fn report_page(page: Page) -> String {
    let panel = panel(page);
    let sections: String = panel
        .sections
        .iter()
        .map(|(title, text)| {
            card(
                title,
                &format!(r#"<p class="text-gray-600">{text}</p>"#),
            )
        })
        .collect();

    format!(
        r##"<p class="text-gray-600 mb-6"><i class="fas fa-{icon} mr-2 text-primary-500"></i>{intro}</p>
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            {sections}
        </div>"##,
        icon = panel.icon,
        intro = panel.intro,
    )
}

/// Denial panel for an authenticated caller lacking the page's role.
pub fn not_authorized_panel(page: Page) -> String {
    card(
        page.title(),
        &empty_state("lock", NOT_AUTHORIZED_MESSAGE, "Contacta con un administrador si necesitas acceso."),
    )
}

// =============================================================================
// Admin
// =============================================================================

/// Result of an admin form submission, rendered above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotice {
    pub kind: AlertKind,
    pub message: String,
}

/// User creation form.
///
/// `role_options` are role labels; the store's list is preferred and the
/// built-in catalog is the fallback.
pub fn admin_page(role_options: &[String], notice: Option<&AdminNotice>) -> String {
    let notice_html = notice
        .map(|n| alert(n.kind, &n.message))
        .unwrap_or_default();

    let options: Vec<(String, String)> = role_options
        .iter()
        .map(|label| (label.clone(), title_case(label)))
        .collect();

    let form = format!(
        r##"<form method="POST" action="/admin" class="space-y-4">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {username}
                {password}
                {full_name}
                {email}
            </div>
            {roles}
            <button type="submit" class="bg-primary-600 hover:bg-primary-700 text-white px-4 py-2 rounded-lg font-medium transition-colors">
                <i class="fas fa-user-plus mr-1"></i>Crear usuario
            </button>
        </form>"##,
        username = input("username", "Usuario", "text", "Nombre de usuario", true),
        password = input("password", "Contraseña", "password", "Contraseña", true),
        full_name = input("full_name", "Nombre completo (opcional)", "text", "Nombre y apellidos", false),
        email = input("email", "Email (opcional)", "email", "correo@club.es", false),
        roles = checkboxes("roles", "Roles", &options),
    );

    format!(
        r##"<p class="text-gray-600 mb-6">{intro}</p>
        {notice_html}
        {form}"##,
        intro = panel(Page::Admin).intro,
        form = card("Nuevo usuario", &form),
    )
}

/// "Usuario 'x' creado con roles: a, b." or "... sin roles."
pub fn created_message(username: &str, roles: &[&str]) -> String {
    if roles.is_empty() {
        format!("Usuario '{username}' creado sin roles.")
    } else {
        format!("Usuario '{username}' creado con roles: {}.", roles.join(", "))
    }
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Full page for a 503.
pub fn service_unavailable_page() -> String {
    bare_page(
        SERVICE_UNAVAILABLE_MESSAGE,
        &card(
            SERVICE_UNAVAILABLE_MESSAGE,
            &format!(
                r#"<p class="text-gray-600">No se puede acceder al almacén de usuarios. Inténtalo de nuevo en unos minutos.</p>
                <p class="mt-4">{}</p>"#,
                badge("503", "red")
            ),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use depor_policy::ROUTES;

    #[test]
    fn test_every_routed_page_has_a_body() {
        for rule in ROUTES {
            assert!(!report_page(rule.page).is_empty());
        }
    }

    #[test]
    fn test_created_message() {
        assert_eq!(
            created_message("laura", &["medico", "nutricion"]),
            "Usuario 'laura' creado con roles: medico, nutricion."
        );
        assert_eq!(created_message("pablo", &[]), "Usuario 'pablo' creado sin roles.");
    }

    #[test]
    fn test_admin_page_lists_roles() {
        let html = admin_page(&["analista".to_string(), "medico".to_string()], None);
        assert!(html.contains(r#"name="roles" value="analista""#));
        assert!(html.contains(">Medico"));
        assert!(!html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_not_authorized_panel_names_the_page() {
        let html = not_authorized_panel(Page::EstadoMedico);
        assert!(html.contains(NOT_AUTHORIZED_MESSAGE));
        assert!(html.contains("Médico"));
    }
}
