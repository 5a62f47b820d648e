pub mod config;
mod error;
pub mod form_token;
mod http_layers;
pub mod server;
pub mod state;
pub mod views;

pub use config::ServerConfig;
pub use form_token::FormTokens;
pub use http_layers::*;
pub use server::{make_app, run_server};
