use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Client configuration, normally loaded from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Endpoint authority, e.g. `localhost:9000` or `s3.amazonaws.com`.
    pub endpoint: String,
    /// Use https (default) or plain http.
    pub secure: bool,
    /// Empty access key means anonymous, unsigned requests.
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

impl Config {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Config {
            endpoint: endpoint.into(),
            secure: true,
            access_key: String::new(),
            secret_key: String::new(),
            region: "us-east-1".to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Config {
            endpoint: env::var("ENDPOINT").unwrap_or_else(|_| "localhost:9000".to_string()),
            secure: env::var("SECURE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,
            access_key: env::var("ACCESS_KEY_ID").unwrap_or_else(|_| String::new()),
            secret_key: env::var("SECRET_ACCESS_KEY").unwrap_or_else(|_| String::new()),
            region: env::var("REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.endpoint)
    }
}
