use std::sync::Arc;

use opentelemetry_tide::TideExt;
use structopt::StructOpt;
use tide::sessions::{MemoryStore, SessionMiddleware};

pub mod api;
pub mod archive;
pub mod pages;
pub mod session;
pub mod telemetry;
pub mod web;

use api::{AlbumApi, HttpApi};

/// Shortest session secret tide's cookie signing accepts.
const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct State {
    pub api: Arc<dyn AlbumApi>,
    pub tera: Arc<tera::Tera>,
}

#[derive(Debug)]
pub enum Error {
    TemplatePathError(std::io::Error),
    TemplateParseError(tera::Error),
    TelemetryInitError(anyhow::Error),
    InvalidApiUrl(url::ParseError),
    SessionSecretTooShort(usize),
    ListenError(std::io::Error),
}

impl From<Error> for u8 {
    fn from(error: Error) -> u8 {
        match error {
            Error::TemplatePathError(_) => 2,
            Error::TemplateParseError(_) => 3,
            Error::TelemetryInitError(_) => 4,
            Error::InvalidApiUrl(_) => 5,
            Error::SessionSecretTooShort(_) => 6,
            Error::ListenError(_) => 7,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TemplatePathError(err) => {
                write!(f, "Template path error: {}", err)
            },
            Error::TemplateParseError(err) => {
                write!(f, "Template parsing error: {}", err)
            },
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::InvalidApiUrl(err) => {
                write!(f, "Invalid backend API url: {}", err)
            },
            Error::SessionSecretTooShort(len) => {
                write!(
                    f,
                    "Session secret is {} bytes, needs at least {}",
                    len, MIN_SESSION_SECRET_LEN
                )
            },
            Error::ListenError(err) => {
                write!(f, "Failed to serve: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "SHUTTERBOX_BIND_ADDRESS")]
    address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8501", env = "SHUTTERBOX_BIND_PORT")]
    port: u16,

    /// Base URL of the album backend API.
    #[structopt(
        long,
        default_value = "http://127.0.0.1:3000",
        env = "SHUTTERBOX_API_URL"
    )]
    api_url: String,

    /// Secret used to sign session cookies, at least 32 bytes.
    #[structopt(long, env = "SHUTTERBOX_SESSION_SECRET", hide_env_values = true)]
    session_secret: String,

    /// Path to Tera templates directory
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./templates",
        env = "SHUTTERBOX_TEMPLATE_PATH"
    )]
    template_path: std::path::PathBuf,
}

/// Builds the front-end server around `state`.
///
/// Sessions live in process memory and are lost on restart.
pub fn app(state: State, session_secret: &[u8]) -> tide::Server<State> {
    let mut app = tide::with_state(state);

    app.with_default_tracing_middleware();
    app.with(
        SessionMiddleware::new(MemoryStore::new(), session_secret)
            .with_cookie_name("shutterbox.sid"),
    );

    web::mount(&mut app);
    app
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Args::from_args();

    telemetry::init().map_err(Error::TelemetryInitError)?;

    if args.session_secret.len() < MIN_SESSION_SECRET_LEN {
        return Err(Error::SessionSecretTooShort(args.session_secret.len()));
    }

    let api = HttpApi::new(&args.api_url).map_err(Error::InvalidApiUrl)?;
    tracing::info!("Using backend API at {}", args.api_url);

    let template_path = args
        .template_path
        .canonicalize()
        .map_err(Error::TemplatePathError)?;
    let tera = match tera::Tera::new(&template_path.join("**/*.html").to_string_lossy()) {
        Ok(t) => t,
        Err(e) => {
            return Err(Error::TemplateParseError(e));
        },
    };

    let state = State {
        api: Arc::new(api),
        tera: Arc::new(tera),
    };
    let server = app(state, args.session_secret.as_bytes());

    let address: &str = args.address.as_ref();
    server
        .listen((address, args.port))
        .await
        .map_err(Error::ListenError)?;

    Ok(())
}
