use std::env;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::services::model_service::ModelRole;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub api_base: Option<String>,
    pub fast_model: String,
    pub slow_model: String,
    pub executor_model: String,
    pub use_mock: bool,
    pub model_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: SecretString::from(env::var("API_KEY").unwrap_or_default()),
            api_base: env::var("API_BASE").ok().filter(|base| !base.is_empty()),
            fast_model: env::var("FAST_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            slow_model: env::var("SLOW_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            executor_model: env::var("EXECUTOR_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            use_mock: env::var("MOCK_MODE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn model_for(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Fast => &self.fast_model,
            ModelRole::Slow => &self.slow_model,
            ModelRole::Executor => &self.executor_model,
        }
    }

    pub fn has_api_key(&self) -> bool {
        use secrecy::ExposeSecret;
        !self.api_key.expose_secret().is_empty()
    }

    #[cfg(test)]
    pub fn test_config(data_dir: &std::path::Path) -> Self {
        Self {
            api_key: SecretString::from("test-key".to_string()),
            api_base: None,
            fast_model: "fast-test".to_string(),
            slow_model: "slow-test".to_string(),
            executor_model: "executor-test".to_string(),
            use_mock: true,
            model_timeout_secs: 5,
            data_dir: data_dir.to_path_buf(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
