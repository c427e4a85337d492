//! Layered configuration: defaults, then TOML file, then `LABTRACK_*`
//! environment variables, then command-line flags.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use labtrack_api::ApiConfig;
use labtrack_core::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "labtrack.toml";
pub const ENV_PREFIX: &str = "LABTRACK_";

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub allow_admin_signup: bool,
    pub cors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let api = ApiConfig::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            db_path: PathBuf::from("labtrack.sqlite3"),
            log_level: default_log_level().to_string(),
            log_dir: None,
            jwt_secret: api.jwt_secret,
            access_token_ttl_secs: api.access_token_ttl_secs,
            refresh_token_ttl_secs: api.refresh_token_ttl_secs,
            allow_admin_signup: api.allow_admin_signup,
            cors: api.cors,
        }
    }
}

impl Settings {
    /// Resolves settings from every source below command-line flags.
    ///
    /// An explicitly named `config_file` must exist; the default
    /// `labtrack.toml` is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(format!("config file `{}` does not exist", path.display()).into());
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
        db_path: Option<PathBuf>,
    ) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            jwt_secret: self.jwt_secret.clone(),
            access_token_ttl_secs: self.access_token_ttl_secs,
            refresh_token_ttl_secs: self.refresh_token_ttl_secs,
            allow_admin_signup: self.allow_admin_signup,
            cors: self.cors,
        }
    }

    /// Copy safe to print: the signing secret is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.jwt_secret.is_empty() {
            copy.jwt_secret = REDACTED.to_string();
        }
        copy
    }
}
