use anyhow::{Context, Result};
use std::sync::Arc;

use tracing::{info, warn};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use super::error::ApiError;
use super::form_token::FormTokens;
use super::views::{
    AddFormView, CandidateView, EditFormView, ListingView, MovieView, SelectView,
};
use super::{log_requests, state::*, ServerConfig};
use crate::catalog::{validate_rating, validate_review, CatalogError, MovieCatalog};

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct AddQuery {
    pub id: Option<String>,
}

impl AddQuery {
    /// Provider id to select. A blank `id` means no selection.
    fn provider_id(&self) -> Result<Option<i64>, ApiError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                CatalogError::InvalidInput(format!("Invalid movie id {:?}", raw)).into()
            }),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SearchBody {
    pub title: String,
    pub csrf_token: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ReviewBody {
    pub rating: String,
    pub review: String,
    pub csrf_token: String,
}

/// Path ids that are not integers match no entry.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::UnknownId(raw.to_string()))
}

fn check_form_token(tokens: &FormTokens, token: &str) -> Result<(), ApiError> {
    if tokens.verify(token) {
        Ok(())
    } else {
        warn!("Rejected form submission with missing or invalid token");
        Err(ApiError::InvalidFormToken)
    }
}

async fn home(State(catalog): State<GuardedMovieCatalog>) -> Result<Json<ListingView>, ApiError> {
    let movies = catalog.ranked_listing()?;
    Ok(Json(ListingView {
        movies: movies.into_iter().map(MovieView::from).collect(),
    }))
}

async fn add_page(
    State(catalog): State<GuardedMovieCatalog>,
    State(tokens): State<GuardedFormTokens>,
    Query(query): Query<AddQuery>,
) -> Result<Response, ApiError> {
    match query.provider_id()? {
        Some(provider_id) => {
            let id = catalog.select(provider_id).await?;
            Ok(Redirect::to(&format!("/edit/{}", id)).into_response())
        }
        None => Ok(Json(AddFormView {
            csrf_token: tokens.issue(),
            title: String::new(),
            errors: vec![],
        })
        .into_response()),
    }
}

async fn search_movies(
    State(catalog): State<GuardedMovieCatalog>,
    State(tokens): State<GuardedFormTokens>,
    Form(body): Form<SearchBody>,
) -> Result<Response, ApiError> {
    check_form_token(&tokens, &body.csrf_token)?;

    let query = body.title.trim().to_string();
    if query.is_empty() {
        let view = AddFormView {
            csrf_token: tokens.issue(),
            title: body.title,
            errors: vec!["Movie title is required".to_string()],
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response());
    }

    let results = catalog.search(&query).await?;
    let candidates = results
        .into_iter()
        .map(|r| CandidateView::new(r, catalog.image_base_url()))
        .collect();
    Ok(Json(SelectView { query, candidates }).into_response())
}

async fn edit_page(
    State(catalog): State<GuardedMovieCatalog>,
    State(tokens): State<GuardedFormTokens>,
    Path(id): Path<String>,
) -> Result<Json<EditFormView>, ApiError> {
    let entry = catalog.entry(parse_id(&id)?)?;
    Ok(Json(EditFormView {
        csrf_token: tokens.issue(),
        rating: entry.rating.map(|r| r.to_string()).unwrap_or_default(),
        review: entry.review.clone(),
        movie: entry.into(),
        errors: vec![],
    }))
}

async fn submit_review(
    State(catalog): State<GuardedMovieCatalog>,
    State(tokens): State<GuardedFormTokens>,
    Path(id): Path<String>,
    Form(body): Form<ReviewBody>,
) -> Result<Response, ApiError> {
    let entry = catalog.entry(parse_id(&id)?)?;
    check_form_token(&tokens, &body.csrf_token)?;

    let mut errors = vec![];
    let rating = match body.rating.trim().parse::<f64>() {
        Ok(rating) => match validate_rating(rating) {
            Ok(()) => Some(rating),
            Err(err) => {
                errors.push(err.to_string());
                None
            }
        },
        Err(_) => {
            errors.push("Rating must be a number".to_string());
            None
        }
    };
    if let Err(err) = validate_review(&body.review) {
        errors.push(err.to_string());
    }

    match rating {
        Some(rating) if errors.is_empty() => {
            catalog.review(entry.id, rating, &body.review)?;
            Ok(Redirect::to("/").into_response())
        }
        _ => {
            warn!("Rejected review of movie #{}: {:?}", entry.id, errors);
            let view = EditFormView {
                movie: entry.into(),
                csrf_token: tokens.issue(),
                rating: body.rating,
                review: body.review,
                errors,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
    }
}

async fn delete_movie(
    State(catalog): State<GuardedMovieCatalog>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    catalog.delete(parse_id(&id)?)?;
    Ok(Redirect::to("/"))
}

pub fn make_app(
    config: ServerConfig,
    catalog: GuardedMovieCatalog,
    form_tokens: GuardedFormTokens,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        catalog,
        form_tokens,
    };

    let mut app: Router = Router::new()
        .route("/", get(home))
        .route("/add", get(add_page).post(search_movies))
        .route("/edit/{id}", get(edit_page).post(submit_review))
        .route("/delete/{id}", get(delete_movie).post(delete_movie))
        .with_state(state.clone());

    if let Some(frontend_path) = config.frontend_dir_path {
        let static_files_service =
            ServeDir::new(frontend_path).append_index_html_on_directories(true);
        app = app.nest_service("/static", static_files_service);
    }

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    catalog: MovieCatalog,
    form_tokens: FormTokens,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, Arc::new(catalog), Arc::new(form_tokens));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
