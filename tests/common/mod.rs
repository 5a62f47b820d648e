//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, INCEPTION_TMDB_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_add_movie() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.select(INCEPTION_TMDB_ID).await;
//!     assert_eq!(response.status(), StatusCode::SEE_OTHER);
//! }
//! ```

#![allow(dead_code)]

mod client;
mod constants;
mod fake_tmdb;
mod server;

// Public API - this is what tests import
pub use client::{location, TestClient};
pub use constants::*;
pub use server::TestServer;
