use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::config::Config;
use crate::constants::PROJECT_NAME;
use crate::error::Result;
use crate::identity::IdentityStore;
use crate::models::{Credentials, UserId};
use crate::session::{issue_token, session_clear_cookie, session_set_cookie, CurrentUser};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub project_name: &'static str,
    pub is_authenticated: bool,
    pub username: Option<String>,
}

/// Set the session cookie and send the browser home
fn start_session(user_id: UserId, config: &Config) -> Result<Response> {
    let token = issue_token(user_id, Utc::now().timestamp(), &config.secret_key)?;
    let cookie = session_set_cookie(&token, config);
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

/// Create an account and log it in
///
/// POST /signup (form fields `username`, `password`)
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Response> {
    let db = state.db.clone();
    let user_id = tokio::task::spawn_blocking(move || {
        IdentityStore::new(db).signup(&form.username, &form.password)
    })
    .await??;

    start_session(user_id, &state.config)
}

/// Log in with a username and password
///
/// POST /login (form fields `username`, `password`). Bad credentials
/// redirect back to the login page without a session.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Response> {
    let db = state.db.clone();
    let user_id = tokio::task::spawn_blocking(move || {
        IdentityStore::new(db).authenticate(&form.username, &form.password)
    })
    .await??;

    tracing::info!("User {} logged in", user_id);
    start_session(user_id, &state.config)
}

/// End the session
pub async fn logout(CurrentUser(user_id): CurrentUser) -> impl IntoResponse {
    tracing::info!("User {} logged out", user_id);
    ([(SET_COOKIE, session_clear_cookie())], Redirect::to("/"))
}

/// Who is logged in, if anyone
pub async fn index(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
) -> Result<Json<IndexResponse>> {
    let username = match user {
        Some(CurrentUser(user_id)) => {
            let db = state.db.clone();
            tokio::task::spawn_blocking(move || IdentityStore::new(db).username(user_id)).await??
        }
        None => None,
    };

    Ok(Json(IndexResponse {
        project_name: PROJECT_NAME,
        is_authenticated: username.is_some(),
        username,
    }))
}
