// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Built once at startup and shared through `AppState`; nothing reads the
//! environment after that.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Where user data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Serve fixture data bundled with the binary.
    Mock,
    /// Call the live API under `api_base_path`.
    Backend,
}

impl FromStr for DataSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(DataSource::Mock),
            "backend" => Ok(DataSource::Backend),
            _ => Err(ConfigError::Invalid {
                name: "DATA_SOURCE",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Mock => f.write_str("Mock"),
            DataSource::Backend => f.write_str("Backend"),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Data access ---
    /// Fixture data or live API
    pub data_source: DataSource,
    /// Base path of the live data API (e.g. `/php`)
    pub api_base_path: String,
    /// Host serving the live data API
    pub backend_url: String,

    // --- Auth backend ---
    /// Base URL of the hosted auth backend
    pub auth_url: String,
    /// Public (anon) API key for the auth backend
    pub auth_anon_key: String,
    /// Secret the auth backend signs session tokens with (raw bytes)
    pub auth_jwt_secret: Vec<u8>,

    // --- Server ---
    /// Origin this app is served from; OAuth returns to `<origin>/dashboard`
    pub public_origin: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self::test_default()
    }
}

impl Config {
    /// Offline configuration used by tests.
    pub fn test_default() -> Self {
        Self {
            data_source: DataSource::Mock,
            api_base_path: "/php".to_string(),
            backend_url: "http://localhost:8000".to_string(),
            auth_url: "http://localhost:54321".to_string(),
            auth_anon_key: "test_anon_key".to_string(),
            auth_jwt_secret: b"test_jwt_secret_32_bytes_minimum!".to_vec(),
            public_origin: "http://localhost:8080".to_string(),
            port: 8080,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_source = match env::var("DATA_SOURCE") {
            Ok(raw) => raw.parse()?,
            Err(_) => DataSource::Mock,
        };

        Ok(Self {
            data_source,
            api_base_path: normalize_base_path(
                &env::var("API_BASE_PATH").unwrap_or_else(|_| "/php".to_string()),
            ),
            backend_url: trim_origin(
                &env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
            ),
            auth_url: env::var("AUTH_URL")
                .map(|v| trim_origin(&v))
                .map_err(|_| ConfigError::Missing("AUTH_URL"))?,
            auth_anon_key: env::var("AUTH_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AUTH_ANON_KEY"))?,
            auth_jwt_secret: env::var("AUTH_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("AUTH_JWT_SECRET"))?
                .trim()
                .as_bytes()
                .to_vec(),
            public_origin: trim_origin(
                &env::var("PUBLIC_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            ),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Whether the session cookie should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.public_origin.starts_with("https://")
    }
}

fn trim_origin(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Base paths always start with `/` and never end with one.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    format!("/{}", trimmed)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
