//! In-process stand-in for the TMDB v3 API
//!
//! Serves `/search/movie` and `/movie/{id}` from the fixtures in
//! `constants.rs` and rejects requests without the expected bearer token.

use super::constants::*;
use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct FixtureMovie {
    id: i64,
    title: &'static str,
    release_date: &'static str,
    poster_path: Option<&'static str>,
}

const FIXTURES: &[FixtureMovie] = &[
    FixtureMovie {
        id: INCEPTION_TMDB_ID,
        title: INCEPTION_TITLE,
        release_date: INCEPTION_RELEASE_DATE,
        poster_path: Some(INCEPTION_POSTER_PATH),
    },
    FixtureMovie {
        id: MATRIX_TMDB_ID,
        title: MATRIX_TITLE,
        release_date: MATRIX_RELEASE_DATE,
        poster_path: Some(MATRIX_POSTER_PATH),
    },
    FixtureMovie {
        id: INTERSTELLAR_TMDB_ID,
        title: INTERSTELLAR_TITLE,
        release_date: INTERSTELLAR_RELEASE_DATE,
        poster_path: Some(INTERSTELLAR_POSTER_PATH),
    },
    FixtureMovie {
        id: POSTERLESS_TMDB_ID,
        title: "Lost Reel",
        release_date: "1925-01-01",
        poster_path: None,
    },
];

#[derive(Deserialize)]
struct SearchParams {
    query: String,
    language: Option<String>,
}

#[derive(Deserialize)]
struct DetailParams {
    language: Option<String>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TEST_TMDB_API_KEY);
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status_message": "Invalid API key" })),
    )
        .into_response()
}

async fn search_movie(headers: HeaderMap, Query(params): Query<SearchParams>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if params.language.as_deref() != Some("en-US") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if params.query == FAILING_SEARCH_QUERY {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let needle = params.query.to_lowercase();
    let results: Vec<Value> = FIXTURES
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .map(|m| {
            json!({
                "id": m.id,
                "title": m.title,
                "release_date": m.release_date,
                "poster_path": m.poster_path,
            })
        })
        .collect();
    Json(json!({ "page": 1, "total_results": results.len(), "results": results })).into_response()
}

async fn movie_detail(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(params): Query<DetailParams>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if params.language.as_deref() != Some("en-US") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if id == FAILING_TMDB_ID {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match FIXTURES.iter().find(|m| m.id == id) {
        Some(m) => Json(json!({
            "id": m.id,
            "original_title": m.title,
            "overview": format!("{} overview.", m.title),
            "release_date": m.release_date,
            "poster_path": m.poster_path,
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_message": "The resource you requested could not be found." })),
        )
            .into_response(),
    }
}

/// Spawns the fake API on a random port and returns its base URL.
pub async fn spawn_fake_tmdb() -> String {
    let app = Router::new()
        .route("/search/movie", get(search_movie))
        .route("/movie/{id}", get(movie_detail));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake TMDB");
    let port = listener
        .local_addr()
        .expect("Failed to get fake TMDB address")
        .port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake TMDB failed");
    });

    format!("http://127.0.0.1:{}", port)
}
