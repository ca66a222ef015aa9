use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

/// Default location of the hosted hotel API
pub const DEFAULT_API_URL: &str =
    "https://api-proyectofinal-g7ete8f3bvcsf7ch.centralus-01.azurewebsites.net/api";

/// Config file looked up in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "hotel-sgs.toml";

/// Prefix for environment overrides, e.g. `HOTEL__API__BASE_URL`
pub const ENV_PREFIX: &str = "HOTEL__";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    pub base_url: String,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the bearer token is kept between invocations
    pub session_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_file: state_dir().join("session.json"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// How often the terminal console re-fetches the active screen
    #[serde(with = "humantime_serde")]
    pub refresh_rate: Duration,
    /// Log destination while the console owns the terminal
    pub log_file: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            refresh_rate: Duration::from_secs(30),
            log_file: state_dir().join("hotel-sgs.log"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Remote API settings
    pub api: ApiConfig,
    /// Token persistence
    pub session: SessionConfig,
    /// Terminal console settings
    pub console: ConsoleConfig,
}

impl Configuration {
    /// Load from `hotel-sgs.toml` in the working directory plus environment overrides
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::figment(Path::new(CONFIG_FILE))
            .extract()
            .map_err(Box::new)
    }

    /// Load from an explicit file plus environment overrides
    pub fn load_from_path(path: &Path) -> Result<Self, Box<figment::Error>> {
        Self::figment(path).extract().map_err(Box::new)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Configuration::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

/// Per-user directory for the session file and console log.
///
/// Falls back to the working directory when no home directory is known.
fn state_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hotel-sgs")
}
