//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with redirects disabled so tests can assert on the
//! `303 See Other` responses themselves.
//!
//! When routes or form fields change, update only this file.

use super::constants::*;
use reqwest::{header, redirect, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Listing
    // ========================================================================

    pub async fn get_listing(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Listing request failed")
    }

    /// Movies of the ranked listing, asserting the request succeeded.
    pub async fn movies(&self) -> Vec<Value> {
        let response = self.get_listing().await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Listing is not JSON");
        body["movies"].as_array().cloned().unwrap_or_default()
    }

    // ========================================================================
    // Adding
    // ========================================================================

    pub async fn get_add_form(&self) -> Response {
        self.client
            .get(self.url("/add"))
            .send()
            .await
            .expect("Add form request failed")
    }

    /// A fresh form token taken from the add form.
    pub async fn form_token(&self) -> String {
        let body: Value = self
            .get_add_form()
            .await
            .json()
            .await
            .expect("Add form is not JSON");
        body["csrf_token"]
            .as_str()
            .expect("Add form has no token")
            .to_string()
    }

    pub async fn search(&self, title: &str, csrf_token: &str) -> Response {
        self.client
            .post(self.url("/add"))
            .form(&[("title", title), ("csrf_token", csrf_token)])
            .send()
            .await
            .expect("Search request failed")
    }

    pub async fn select(&self, provider_id: i64) -> Response {
        self.client
            .get(self.url(&format!("/add?id={}", provider_id)))
            .send()
            .await
            .expect("Select request failed")
    }

    /// Selects `provider_id` and returns the id of the created entry.
    pub async fn add_movie(&self, provider_id: i64) -> i64 {
        let response = self.select(provider_id).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        location(&response)
            .strip_prefix("/edit/")
            .and_then(|id| id.parse().ok())
            .expect("Select did not redirect to the edit page")
    }

    // ========================================================================
    // Editing and deleting
    // ========================================================================

    pub async fn get_edit_form(&self, id: &str) -> Response {
        self.client
            .get(self.url(&format!("/edit/{}", id)))
            .send()
            .await
            .expect("Edit form request failed")
    }

    pub async fn submit_review(
        &self,
        id: &str,
        rating: &str,
        review: &str,
        csrf_token: &str,
    ) -> Response {
        self.client
            .post(self.url(&format!("/edit/{}", id)))
            .form(&[
                ("rating", rating),
                ("review", review),
                ("csrf_token", csrf_token),
            ])
            .send()
            .await
            .expect("Review request failed")
    }

    /// Reviews entry `id` with a fresh token, asserting the redirect home.
    pub async fn review_movie(&self, id: i64, rating: &str, review: &str) {
        let token = self.form_token().await;
        let response = self
            .submit_review(&id.to_string(), rating, review, &token)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    pub async fn delete(&self, id: &str) -> Response {
        self.client
            .get(self.url(&format!("/delete/{}", id)))
            .send()
            .await
            .expect("Delete request failed")
    }

    pub async fn delete_with_post(&self, id: &str) -> Response {
        self.client
            .post(self.url(&format!("/delete/{}", id)))
            .send()
            .await
            .expect("Delete request failed")
    }
}

/// Target of a redirect response.
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Response has no Location header")
        .to_str()
        .expect("Location is not ASCII")
}
