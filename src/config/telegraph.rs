use std::time::Duration;

use serde::Deserialize;

use crate::telegraph::transport::DEFAULT_API_SERVER;

#[derive(Debug, Clone, Deserialize)]
pub struct TelegraphConfig {
    pub access_token: Option<String>,
    #[serde(default = "default_api_server")]
    pub api_server: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_validate_content")]
    pub validate_content: bool,
}

impl TelegraphConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TelegraphConfig {
    fn default() -> Self {
        TelegraphConfig {
            access_token: None,
            api_server: default_api_server(),
            timeout_secs: default_timeout_secs(),
            validate_content: default_validate_content(),
        }
    }
}

fn default_api_server() -> String { DEFAULT_API_SERVER.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_validate_content() -> bool { true }
