use std::path::PathBuf;

use env_helpers::get_env_default;
use url::Url;

use crate::application::{language::UserLanguage, runtime_env::RuntimeEnv};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_FILE: &str = ".authgate/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, joined with every request path.
    pub api_url: Url,
    /// `development` exposes error details to the user.
    pub env: RuntimeEnv,
    pub language: UserLanguage,
    /// Where the session (token + user) is persisted between runs.
    pub session_file: PathBuf,
    /// Optional JSON log sink in addition to the console.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url: Url = get_env_default("API_URL", Url::parse(DEFAULT_API_URL).unwrap());
        let env: RuntimeEnv = get_env_default("APP_ENV", RuntimeEnv::Production);
        let language: UserLanguage = get_env_default("APP_LANGUAGE", UserLanguage::Mn);
        let session_file: PathBuf =
            get_env_default("SESSION_FILE", PathBuf::from(DEFAULT_SESSION_FILE));
        let log_file: Option<PathBuf> = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            api_url,
            env,
            language,
            session_file,
            log_file,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).unwrap(),
            env: RuntimeEnv::default(),
            language: UserLanguage::default(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            log_file: None,
        }
    }
}
