// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User directory backed by either fixture data or the live data API.

use crate::config::{Config, DataSource};
use crate::models::User;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const FIXTURE_USERS: &str = include_str!("../../data/users.json");
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Data API request failed: {0}")]
    Request(String),

    #[error("Data API returned HTTP {0}")]
    Status(u16),

    #[error("Malformed user data: {0}")]
    Decode(String),
}

impl From<DirectoryError> for crate::error::AppError {
    fn from(err: DirectoryError) -> Self {
        crate::error::AppError::DataApi(err.to_string())
    }
}

/// Read access to user records.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError>;
}

/// Users bundled with the binary.
pub struct FixtureUsers {
    users: Vec<User>,
}

impl FixtureUsers {
    pub fn load() -> Result<Self, DirectoryError> {
        Self::from_json(FIXTURE_USERS)
    }

    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        let users: Vec<User> =
            serde_json::from_str(raw).map_err(|e| DirectoryError::Decode(e.to_string()))?;

        for user in users.iter().filter(|u| u.last_active_at().is_none()) {
            tracing::warn!(
                user_id = %user.id,
                last_active = %user.last_active,
                "Fixture user has a malformed last_active timestamp"
            );
        }

        Ok(Self { users })
    }
}

#[async_trait]
impl UserSource for FixtureUsers {
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.users.clone())
    }
}

/// Both shapes the data API has used for the user list.
#[derive(Deserialize)]
#[serde(untagged)]
enum UsersPayload {
    Bare(Vec<User>),
    Wrapped { users: Vec<User> },
}

/// Users served by the live data API.
pub struct ApiUsers {
    http: reqwest::Client,
    url: String,
}

impl ApiUsers {
    pub fn new(backend_url: &str, api_base_path: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: format!("{}{}/users.php", backend_url, api_base_path),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl UserSource for ApiUsers {
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let payload: UsersPayload = response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;

        Ok(match payload {
            UsersPayload::Bare(users) | UsersPayload::Wrapped { users } => users,
        })
    }
}

/// Pick the user source named by the configuration.
pub fn user_source(config: &Config) -> anyhow::Result<Arc<dyn UserSource>> {
    let source: Arc<dyn UserSource> = match config.data_source {
        DataSource::Mock => Arc::new(FixtureUsers::load()?),
        DataSource::Backend => Arc::new(ApiUsers::new(&config.backend_url, &config.api_base_path)?),
    };
    tracing::info!(data_source = %config.data_source, "User directory initialized");
    Ok(source)
}
