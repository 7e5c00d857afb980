//! Request handlers for the dashboard.

use axum::{
    Extension, Form, Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use depor_core::{Role, parse_role_list};
use depor_policy::{Page, PageVariant, Sidebar, resolve};
use depor_session::Principal;
use depor_store::{NewUser, StoreError, create_user};
use serde_json::json;

use crate::auth::{CurrentSession, login_required};
use crate::error::DashboardError;
use crate::pages::{self, AdminNotice};
use crate::state::AppState;
use crate::templates::{AlertKind, layout};

// =============================================================================
// Page Handlers (HTML responses)
// =============================================================================

/// Handler for every page path. Unknown paths render home.
pub async fn page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    uri: Uri,
) -> Response {
    let path = uri.path();
    let Some(principal) = current.session.principal() else {
        return login_required(&state, &current);
    };

    match resolve(path, Some(&principal.roles)) {
        PageVariant::Render(Page::Admin) => {
            let body = pages::admin_page(&role_options(&state).await, None);
            shell(&state, principal, path, Page::Admin, StatusCode::OK, &body)
        }
        PageVariant::Render(page) => shell(
            &state,
            principal,
            path,
            page,
            StatusCode::OK,
            &pages::report_page(page),
        ),
        PageVariant::NotAuthorized(page) => shell(
            &state,
            principal,
            path,
            page,
            StatusCode::FORBIDDEN,
            &pages::not_authorized_panel(page),
        ),
        PageVariant::SessionExpired => login_required(&state, &current),
    }
}

fn shell(
    state: &AppState,
    principal: &Principal,
    path: &str,
    page: Page,
    status: StatusCode,
    body: &str,
) -> Response {
    let sidebar = Sidebar::derive(Some(&principal.roles), path);
    let html = layout(
        &state.config().dashboard.title,
        page.title(),
        principal,
        &sidebar,
        body,
    );
    (status, Html(html)).into_response()
}

/// Role labels for the admin form: the store's catalog, or the built-in one
/// when the store cannot be read.
async fn role_options(state: &AppState) -> Vec<String> {
    match state.store().list_roles().await {
        Ok(roles) if !roles.is_empty() => roles,
        Ok(_) => builtin_role_options(),
        Err(e) => {
            tracing::warn!(error = %e, "role list unavailable; using built-in catalog");
            builtin_role_options()
        }
    }
}

fn builtin_role_options() -> Vec<String> {
    Role::ALL.iter().map(|r| r.as_str().to_string()).collect()
}

// =============================================================================
// Admin
// =============================================================================

/// Admin form fields. `roles` may repeat and each value may be a comma list.
#[derive(Debug, Default)]
struct AdminForm {
    username: String,
    password: String,
    full_name: Option<String>,
    email: Option<String>,
    roles: Vec<String>,
}

impl AdminForm {
    fn from_fields(fields: Vec<(String, String)>) -> Self {
        let mut form = AdminForm::default();
        for (key, value) in fields {
            match key.as_str() {
                "username" => form.username = value,
                "password" => form.password = value,
                "full_name" => form.full_name = Some(value),
                "email" => form.email = Some(value),
                "roles" => form.roles.push(value),
                _ => {}
            }
        }
        form
    }
}

/// Handler for user creation (POST /admin). Admin role only.
pub async fn admin_create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, DashboardError> {
    let Some(principal) = current.session.principal() else {
        return Ok(login_required(&state, &current));
    };

    if resolve(Page::Admin.canonical_path(), Some(&principal.roles)) != PageVariant::Render(Page::Admin) {
        tracing::warn!(username = %principal.username, "user creation refused: not an administrator");
        return Ok(shell(
            &state,
            principal,
            Page::Admin.canonical_path(),
            Page::Admin,
            StatusCode::FORBIDDEN,
            &pages::not_authorized_panel(Page::Admin),
        ));
    }

    let form = AdminForm::from_fields(fields);

    let (status, notice) = match parse_role_list(&form.roles.join(",")) {
        Err(unknown) => (
            StatusCode::BAD_REQUEST,
            AdminNotice {
                kind: AlertKind::Warning,
                message: format!("Rol desconocido: '{}'.", unknown.0),
            },
        ),
        Ok(roles) => {
            let labels: Vec<&str> = roles.iter().map(Role::as_str).collect();
            let new_user = NewUser::new(form.username, form.password)
                .with_full_name(form.full_name)
                .with_email(form.email)
                .with_roles(roles);

            match create_user(state.store().as_ref(), new_user).await {
                Ok(record) => (
                    StatusCode::OK,
                    AdminNotice {
                        kind: AlertKind::Success,
                        message: pages::created_message(&record.username, &labels),
                    },
                ),
                Err(e @ StoreError::AlreadyExists { .. }) => (
                    StatusCode::CONFLICT,
                    AdminNotice {
                        kind: AlertKind::Danger,
                        message: e.to_string(),
                    },
                ),
                Err(StoreError::InvalidInput(message)) => (
                    StatusCode::BAD_REQUEST,
                    AdminNotice {
                        kind: AlertKind::Warning,
                        message,
                    },
                ),
                Err(e) => return Err(DashboardError::ServiceUnavailable(e)),
            }
        }
    };

    let body = pages::admin_page(&role_options(&state).await, Some(&notice));
    Ok(shell(
        &state,
        principal,
        Page::Admin.canonical_path(),
        Page::Admin,
        status,
        &body,
    ))
}

// =============================================================================
// Health
// =============================================================================

/// Liveness probe.
pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "depor-dashboard" }))
}
