use axum::extract::FromRef;

use crate::catalog::MovieCatalog;
use std::sync::Arc;

use super::form_token::FormTokens;
use super::ServerConfig;

pub type GuardedMovieCatalog = Arc<MovieCatalog>;
pub type GuardedFormTokens = Arc<FormTokens>;

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub catalog: GuardedMovieCatalog,
    pub form_tokens: GuardedFormTokens,
}

impl FromRef<ServerState> for GuardedMovieCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedFormTokens {
    fn from_ref(input: &ServerState) -> Self {
        input.form_tokens.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
