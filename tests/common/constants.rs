//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When fixture movies change, update only this file.

// ============================================================================
// Secrets and endpoints
// ============================================================================

/// Secret signing form tokens on the test server
pub const TEST_SECRET_KEY: &str = "e2e-secret-key";

/// Bearer token the fake TMDB expects
pub const TEST_TMDB_API_KEY: &str = "e2e-tmdb-token";

/// Poster base URL configured on the test server
pub const TEST_IMAGE_BASE_URL: &str = "https://images.test/t/p/w500";

// ============================================================================
// Fake TMDB fixtures
// ============================================================================

pub const INCEPTION_TMDB_ID: i64 = 27205;
pub const INCEPTION_TITLE: &str = "Inception";
pub const INCEPTION_RELEASE_DATE: &str = "2010-07-15";
pub const INCEPTION_POSTER_PATH: &str = "/inception.jpg";

pub const MATRIX_TMDB_ID: i64 = 603;
pub const MATRIX_TITLE: &str = "The Matrix";
pub const MATRIX_RELEASE_DATE: &str = "1999-03-30";
pub const MATRIX_POSTER_PATH: &str = "/matrix.jpg";

pub const INTERSTELLAR_TMDB_ID: i64 = 157336;
pub const INTERSTELLAR_TITLE: &str = "Interstellar";
pub const INTERSTELLAR_RELEASE_DATE: &str = "2014-11-05";
pub const INTERSTELLAR_POSTER_PATH: &str = "/interstellar.jpg";

/// Movie whose detail has no poster
pub const POSTERLESS_TMDB_ID: i64 = 4242;

/// Id for which the fake TMDB answers 500
pub const FAILING_TMDB_ID: i64 = 666;

/// Search query for which the fake TMDB answers 503
pub const FAILING_SEARCH_QUERY: &str = "Unreachable";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// HTTP request timeout for test client (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server readiness (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
