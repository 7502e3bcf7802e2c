use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, flash, views};
use crate::models::user::User;
use crate::services::AuthError;
use crate::services::validation::{LoginInput, ProfileInput};

const USER_ID_KEY: &str = "user_id";

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
}

// ============================================================================
// Guard
// ============================================================================

/// Resolves the session to an [`Actor`], or `Unauthorized` if anonymous.
pub async fn require_authenticated(session: &Session) -> Result<Actor, ApiError> {
    session
        .get::<i32>(USER_ID_KEY)
        .await
        .map_err(ApiError::session)?
        .map(|user_id| Actor { user_id })
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
}

/// Middleware for the owner-only routes. Anonymous requests are sent to
/// the login page with a notice; nothing downstream runs.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match require_authenticated(&session).await {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            Ok(next.run(request).await)
        }
        Err(ApiError::Unauthorized(_)) => {
            flash::info(&session, flash::LOGIN_REQUIRED).await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e),
    }
}

/// The user shown in page chrome: whoever the session belongs to.
pub async fn display_user(state: &AppState, session: &Session) -> Result<Option<User>, ApiError> {
    let Some(user_id) = session
        .get::<i32>(USER_ID_KEY)
        .await
        .map_err(ApiError::session)?
    else {
        return Ok(None);
    };

    Ok(state.auth().display_user(user_id).await?)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let user = display_user(&state, &session).await?;
    let flashes = flash::take(&session).await?;
    Ok(Html(views::login(&views::Layout::new(
        user.as_ref(),
        &flashes,
    ))))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(input): Form<LoginInput>,
) -> Result<Redirect, ApiError> {
    match state.auth().login(&input).await {
        Ok(user) => {
            session.cycle_id().await.map_err(ApiError::session)?;
            session
                .insert(USER_ID_KEY, user.id)
                .await
                .map_err(ApiError::session)?;

            tracing::info!("User logged in: {}", user.username);
            flash::success(&session, flash::LOGIN_SUCCESS).await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::InvalidInput) => {
            flash::error(&session, flash::INVALID_INPUT).await?;
            Ok(Redirect::to("/login"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Failed login attempt for username: {}", input.username.trim());
            flash::error(&session, flash::INVALID_CREDENTIALS).await?;
            Ok(Redirect::to("/"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(
    session: Session,
    Extension(actor): Extension<Actor>,
) -> Result<Redirect, ApiError> {
    session
        .remove::<i32>(USER_ID_KEY)
        .await
        .map_err(ApiError::session)?;
    session.cycle_id().await.map_err(ApiError::session)?;

    tracing::info!("User {} logged out", actor.user_id);
    flash::info(&session, flash::GOODBYE).await?;
    Ok(Redirect::to("/"))
}

/// GET /settings
pub async fn settings_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(actor): Extension<Actor>,
) -> Result<Html<String>, ApiError> {
    let user = state
        .auth()
        .display_user(actor.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Session user no longer exists"))?;
    let flashes = flash::take(&session).await?;

    Ok(Html(views::settings(
        &views::Layout::new(Some(&user), &flashes),
        &user,
    )))
}

/// POST /settings
pub async fn settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(actor): Extension<Actor>,
    Form(input): Form<ProfileInput>,
) -> Result<Redirect, ApiError> {
    match state.auth().update_profile(actor.user_id, &input).await {
        Ok(user) => {
            tracing::info!("User {} changed display name to {}", user.id, user.name);
            flash::success(&session, flash::SETTINGS_UPDATED).await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::Validation(e)) => {
            tracing::debug!("Rejected profile update: {e}");
            flash::error(&session, flash::INVALID_INPUT).await?;
            Ok(Redirect::to("/settings"))
        }
        Err(e) => Err(e.into()),
    }
}
