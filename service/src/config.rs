use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

/// Default base endpoint of the fitness-tracking service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Name of the durable session file, kept in the user's home directory unless overridden.
pub const DEFAULT_SESSION_FILE: &str = ".fitness_session.json";

/// Process configuration, from flags with environment fallbacks.
///
/// Flattened into the binary's own argument parser.
#[derive(Clone, Debug, Parser)]
pub struct Config {
    /// The base URL every request path is appended to (e.g. http://localhost:5000/api).
    /// Fixed for the lifetime of the process.
    #[arg(long, env, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// File the session token and user identity are persisted to so they survive restarts.
    /// Defaults to `~/.fitness_session.json`.
    #[arg(long, env)]
    session_file: Option<PathBuf>,

    /// Optional per-request timeout in whole seconds, at least 1. Unset means a hung
    /// request stays pending.
    #[arg(long, env, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout_secs: Option<u64>,

    /// User agent sent with every request.
    #[arg(long, env, default_value = concat!("fitness-client/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    /// Loads a `.env` file, if present, so the `env` fallbacks see its values.
    /// Call before parsing.
    pub fn load_dotenv() {
        dotenv().ok();
    }

    /// Returns the base URL without a trailing slash so paths can be appended verbatim.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn set_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured session file, else `DEFAULT_SESSION_FILE` in the home directory.
    /// Falls back to the working directory when no home directory is known.
    pub fn session_file(&self) -> PathBuf {
        match &self.session_file {
            Some(path) => path.clone(),
            None => dirs::home_dir()
                .map(|home| home.join(DEFAULT_SESSION_FILE))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
        }
    }

    pub fn set_session_file(mut self, session_file: impl Into<PathBuf>) -> Self {
        self.session_file = Some(session_file.into());
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Sets the timeout, rounded up to whole seconds. A zero duration disables it,
    /// since reqwest would otherwise fail every request immediately.
    pub fn set_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout_secs = timeout
            .filter(|t| !t.is_zero())
            .map(|t| t.as_secs() + u64::from(t.subsec_nanos() > 0));
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
