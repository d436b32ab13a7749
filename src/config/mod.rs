use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BACKEND_PORT: u16 = 6969;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    pub backend_port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the persisted session record
    pub config_dir: PathBuf,
    /// Fixed storage key of the session record
    pub storage_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    pub port: u16,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("SKILLMATCH_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("SKILLMATCH_BACKEND_PORT") {
            self.api.backend_port = v.parse().unwrap_or(self.api.backend_port);
            self.api.base_url = local_url(self.api.backend_port);
        }
        // A full URL wins over the port
        if let Ok(v) = env::var("SKILLMATCH_API_URL") {
            match url::Url::parse(&v) {
                Ok(_) => self.api.base_url = v.trim_end_matches('/').to_string(),
                Err(e) => tracing::warn!("ignoring invalid SKILLMATCH_API_URL '{}': {}", v, e),
            }
        }
        if let Ok(v) = env::var("SKILLMATCH_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("SKILLMATCH_CONFIG_DIR") {
            self.session.config_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("SKILLMATCH_MOCK_PORT") {
            self.mock.port = v.parse().unwrap_or(self.mock.port);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: local_url(DEFAULT_BACKEND_PORT),
                backend_port: DEFAULT_BACKEND_PORT,
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            mock: MockConfig { port: DEFAULT_BACKEND_PORT },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: local_url(DEFAULT_BACKEND_PORT),
                backend_port: DEFAULT_BACKEND_PORT,
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            mock: MockConfig { port: DEFAULT_BACKEND_PORT },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: local_url(DEFAULT_BACKEND_PORT),
                backend_port: DEFAULT_BACKEND_PORT,
                enable_request_logging: false,
            },
            session: SessionConfig::default(),
            mock: MockConfig { port: DEFAULT_BACKEND_PORT },
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            storage_key: crate::session::SESSION_KEY.to_string(),
        }
    }
}

fn local_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

fn default_config_dir() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".config").join("skillmatch"),
        Err(_) => PathBuf::from(".skillmatch"),
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}
