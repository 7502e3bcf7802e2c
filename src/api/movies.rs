use axum::{
    Extension, Form,
    extract::{Path, State, rejection::FormRejection},
    response::{Html, Redirect},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{Actor, display_user, require_authenticated};
use super::validation::parse_movie_id;
use super::{ApiError, AppState, flash, views};
use crate::services::MovieError;
use crate::services::validation::MovieInput;

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let user = display_user(&state, &session).await?;
    let movies = state.movies().list().await?;
    let flashes = flash::take(&session).await?;

    Ok(Html(views::index(
        &views::Layout::new(user.as_ref(), &flashes),
        &movies,
    )))
}

/// POST /
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<Form<MovieInput>, FormRejection>,
) -> Result<Redirect, ApiError> {
    if require_authenticated(&session).await.is_err() {
        return Ok(Redirect::to("/"));
    }

    let Ok(Form(input)) = form else {
        flash::error(&session, flash::INVALID_INPUT).await?;
        return Ok(Redirect::to("/"));
    };

    match state.movies().create(&input).await {
        Ok(_) => flash::success(&session, flash::ITEM_CREATED).await?,
        Err(MovieError::Validation(e)) => {
            tracing::debug!("Rejected new movie: {e}");
            flash::error(&session, flash::INVALID_INPUT).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_movie_id(&id)?;
    let movie = state.movies().get(id).await?;

    let user = state.auth().display_user(actor.user_id).await?;
    let flashes = flash::take(&session).await?;

    Ok(Html(views::edit(
        &views::Layout::new(user.as_ref(), &flashes),
        &movie,
    )))
}

/// POST /movie/edit/{id}
pub async fn edit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Form(input): Form<MovieInput>,
) -> Result<Redirect, ApiError> {
    let id = parse_movie_id(&id)?;
    // A missing movie is a 404 even when the form is also invalid.
    state.movies().get(id).await?;

    match state.movies().update(id, &input).await {
        Ok(_) => {
            flash::success(&session, flash::ITEM_UPDATED).await?;
            Ok(Redirect::to("/"))
        }
        Err(MovieError::Validation(e)) => {
            tracing::debug!("Rejected edit of movie {id}: {e}");
            flash::error(&session, flash::INVALID_INPUT).await?;
            Ok(Redirect::to(&format!("/movie/edit/{id}")))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /movie/delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = parse_movie_id(&id)?;
    state.movies().delete(id).await?;

    flash::success(&session, flash::ITEM_DELETED).await?;
    Ok(Redirect::to("/"))
}
