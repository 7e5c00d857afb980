//! Session cookie handling, login and logout.
//!
//! Every request passes through [`session_middleware`], which verifies the
//! signed session cookie and stores a [`CurrentSession`] in the request
//! extensions. Handlers never look at the cookie themselves.

use axum::{
    Extension, Form,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use depor_core::SessionConfig;
use depor_session::{LOGIN_REDIRECT, LOGOUT_REDIRECT, Principal, Session};
use depor_store::AuthenticatedUser;
use serde::Deserialize;

use crate::error::DashboardError;
use crate::pages::SESSION_EXPIRED_MESSAGE;
use crate::state::AppState;
use crate::templates::{AlertKind, alert, bare_page};

/// The session reconstructed for the current request.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub session: Session,
    /// A session cookie was sent, whether or not it verified.
    pub presented: bool,
}

impl CurrentSession {
    /// The caller sent a cookie that no longer yields a session.
    pub fn is_stale(&self) -> bool {
        self.presented && !self.session.is_authenticated()
    }
}

/// Verify the session cookie and expose the result to handlers.
///
/// A cookie that fails verification is treated as anonymous and is cleared
/// on the way out.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session_config = &state.config().session;

    let current = match extract_session_cookie(request.headers(), &session_config.cookie_name) {
        None => CurrentSession::default(),
        Some(token) => match state.verifier().verify(&token) {
            Ok(verified) => CurrentSession {
                session: Session::Authenticated(verified.principal),
                presented: true,
            },
            Err(e) => {
                tracing::debug!(error = %e, "discarding invalid session cookie");
                CurrentSession {
                    session: Session::Anonymous,
                    presented: true,
                }
            }
        },
    };

    let stale = current.is_stale();
    request.extensions_mut().insert(current);
    let mut response = next.run(request).await;

    if stale
        && !response.headers().contains_key(header::SET_COOKIE)
        && let Ok(value) = HeaderValue::from_str(&clear_cookie(session_config))
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

/// Extract the session cookie value from the request headers.
fn extract_session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let prefix = format!("{}=", cookie_name);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn session_cookie(config: &SessionConfig, token: &str, max_age: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        config.cookie_name,
        token,
        max_age,
        secure_attr(config)
    )
}

fn clear_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        config.cookie_name,
        secure_attr(config)
    )
}

fn secure_attr(config: &SessionConfig) -> &'static str {
    if config.secure_cookie { "; Secure" } else { "" }
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn principal_from(user: AuthenticatedUser) -> Principal {
    Principal {
        user_id: user.user_id,
        username: user.username,
        full_name: user.full_name,
        roles: user.roles,
    }
}

/// Handler for the login page (GET).
pub async fn login_page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Response {
    if current.session.is_authenticated() {
        return Redirect::to(LOGIN_REDIRECT).into_response();
    }
    let notice = current.is_stale().then_some(SESSION_EXPIRED_MESSAGE);
    Html(login_page_template(&state.config().dashboard.title, None, notice)).into_response()
}

/// Handler for login form submission (POST).
pub async fn login_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Form(form): Form<LoginForm>,
) -> Result<Response, DashboardError> {
    let outcome = state
        .authenticator()
        .authenticate(&form.username, &form.password)
        .await?
        .map(principal_from);

    let transition = current.session.login(outcome);

    match (&transition.session, transition.redirect) {
        (Session::Authenticated(principal), Some(redirect)) => {
            let token = state.issuer().issue(principal)?;
            let cookie = session_cookie(
                &state.config().session,
                &token,
                state.issuer().lifetime_secs(),
            );
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(redirect)).into_response())
        }
        _ => Ok((
            StatusCode::UNAUTHORIZED,
            Html(login_page_template(
                &state.config().dashboard.title,
                transition.message,
                None,
            )),
        )
            .into_response()),
    }
}

/// Handler for logout (GET or POST).
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Response {
    if let Some(principal) = current.session.principal() {
        tracing::info!(username = %principal.username, user_id = principal.user_id, "logout");
    }

    let transition = current.session.logout();
    let redirect = transition.redirect.unwrap_or(LOGOUT_REDIRECT);

    (
        [(header::SET_COOKIE, clear_cookie(&state.config().session))],
        Redirect::to(redirect),
    )
        .into_response()
}

/// Response for a protected surface reached without a session.
pub fn login_required(state: &AppState, current: &CurrentSession) -> Response {
    let notice = current.is_stale().then_some(SESSION_EXPIRED_MESSAGE);
    (
        StatusCode::UNAUTHORIZED,
        Html(login_page_template(&state.config().dashboard.title, None, notice)),
    )
        .into_response()
}

/// Generate the login page HTML.
fn login_page_template(app_title: &str, error: Option<&str>, notice: Option<&str>) -> String {
    let notice_html = notice
        .map(|n| alert(AlertKind::Warning, n))
        .unwrap_or_default();
    let error_html = error
        .map(|e| alert(AlertKind::Danger, e))
        .unwrap_or_default();

    let form = format!(
        r##"<div class="bg-white rounded-2xl shadow-2xl p-8">
            <div class="text-center mb-6">
                <h2 class="text-xl font-semibold text-gray-900">Iniciar sesión</h2>
            </div>

            {notice_html}
            {error_html}

            <form method="POST" action="/login" class="space-y-5">
                <div>
                    <label for="username" class="block text-sm font-medium text-gray-700 mb-2">Usuario</label>
                    <div class="relative">
                        <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                            <i class="fas fa-user text-gray-400"></i>
                        </div>
                        <input type="text" id="username" name="username" required autofocus autocomplete="username"
                            class="block w-full pl-10 pr-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-primary-500 focus:border-primary-500"
                            placeholder="Usuario">
                    </div>
                </div>

                <div>
                    <label for="password" class="block text-sm font-medium text-gray-700 mb-2">Contraseña</label>
                    <div class="relative" x-data="{{ show: false }}">
                        <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                            <i class="fas fa-lock text-gray-400"></i>
                        </div>
                        <input :type="show ? 'text' : 'password'" type="password" id="password" name="password" required autocomplete="current-password"
                            class="block w-full pl-10 pr-12 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-primary-500 focus:border-primary-500"
                            placeholder="Contraseña">
                        <button type="button" @click="show = !show"
                            class="absolute inset-y-0 right-0 pr-3 flex items-center text-gray-400 hover:text-gray-600">
                            <i class="fas" :class="show ? 'fa-eye-slash' : 'fa-eye'"></i>
                        </button>
                    </div>
                </div>

                <button type="submit"
                    class="w-full py-3 px-4 bg-primary-600 hover:bg-primary-700 text-white font-medium rounded-lg shadow-lg transition-all duration-200">
                    <i class="fas fa-sign-in-alt mr-2"></i>Entrar
                </button>
            </form>
        </div>"##
    );

    bare_page(app_title, &form)
}
