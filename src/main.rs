use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_catalog_server::config::{
    read_dotenv, AppConfig, CliConfig, FileConfig, Secrets, DEFAULT_DB_PATH,
    DEFAULT_DOTENV_PATH, DEFAULT_TMDB_TIMEOUT_SEC,
};
use movie_catalog_server::{
    catalog::DEFAULT_IMAGE_BASE_URL, tmdb::DEFAULT_TMDB_API_BASE, FormTokens, MovieCatalog,
    RequestsLoggingLevel, ServerConfig, SqliteMovieStore, TmdbClient,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite database file holding the catalog.
    #[clap(long, default_value = DEFAULT_DB_PATH, value_parser = parse_path)]
    pub db_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to a frontend directory served under /static.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Base URL of the TMDB v3 API.
    #[clap(long, default_value = DEFAULT_TMDB_API_BASE)]
    pub tmdb_api_base: String,

    /// Timeout in seconds for TMDB requests.
    #[clap(long, default_value_t = DEFAULT_TMDB_TIMEOUT_SEC)]
    pub tmdb_timeout_sec: u64,

    /// Base URL poster paths are appended to.
    #[clap(long, default_value = DEFAULT_IMAGE_BASE_URL)]
    pub image_base_url: String,

    /// File with KEY=value lines supplying secrets missing from the environment.
    #[clap(long, default_value = DEFAULT_DOTENV_PATH, value_parser = parse_path)]
    pub env_file: PathBuf,

    /// Optional TOML config file. Its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            db_path: args.db_path.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            tmdb_api_base: args.tmdb_api_base.clone(),
            tmdb_timeout_sec: args.tmdb_timeout_sec,
            image_base_url: args.image_base_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    info!("Starting movie catalog server ({})", env!("GIT_HASH"));

    let dotenv = read_dotenv(&cli_args.env_file)?;
    if !dotenv.is_empty() {
        info!("Loaded {} variables from {:?}", dotenv.len(), cli_args.env_file);
    }
    let secrets = match Secrets::from_env_and_dotenv(&dotenv) {
        Ok(secrets) => secrets,
        Err(err) => {
            error!("{}", err);
            return Err(err.into());
        }
    };

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config, secrets)?;

    info!("Opening SQLite movie database at {:?}...", config.db_path);
    let store = SqliteMovieStore::new(&config.db_path)?;

    let provider = TmdbClient::new(
        &config.tmdb_api_base,
        &config.secrets.tmdb_api_key,
        config.tmdb_timeout_sec,
    )?;
    info!("Using TMDB API at {}", provider.base_url());

    let catalog = MovieCatalog::new(
        Arc::new(store),
        Arc::new(provider),
        &config.image_base_url,
    );
    info!("Catalog holds {} movies", catalog.count()?);

    let form_tokens = FormTokens::new(&config.secrets.secret_key);

    info!("Ready to serve at port {}!", config.port);
    movie_catalog_server::run_server(
        ServerConfig {
            requests_logging_level: config.logging_level,
            port: config.port,
            frontend_dir_path: config.frontend_dir_path,
        },
        catalog,
        form_tokens,
    )
    .await
}
