// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the hosted auth backend.
//!
//! Handles:
//! - Checking that an OAuth provider is enabled for the project
//! - Building the authorize URL that starts the provider redirect
//!
//! Session issuance and refresh stay with the backend.

use crate::models::SocialProvider;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Arguments of an OAuth sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInWithOAuth {
    pub provider: SocialProvider,
    pub options: OAuthOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthOptions {
    /// Absolute URL the provider sends the browser back to.
    pub redirect_to: String,
}

/// Error reported in-band by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthApiError {
    pub message: String,
}

/// Result of an OAuth sign-in request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthResponse {
    /// Where to send the browser to continue the flow.
    pub url: Option<String>,
    pub error: Option<AuthApiError>,
}

impl OAuthResponse {
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            url: None,
            error: Some(AuthApiError {
                message: message.into(),
            }),
        }
    }
}

/// Failure to get any answer out of the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthBackendError {
    #[error("Auth backend unreachable: {0}")]
    Transport(String),

    #[error("Unexpected auth backend response: {0}")]
    Decode(String),

    #[error("Auth backend rejected the request (HTTP {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl AuthBackendError {
    /// Message fit to show a user, if the backend supplied one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            AuthBackendError::Rejected {
                message: Some(m), ..
            } if !m.trim().is_empty() => Some(m.as_str()),
            _ => None,
        }
    }
}

/// Operations the app needs from the auth backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in_with_oauth(
        &self,
        request: &SignInWithOAuth,
    ) -> Result<OAuthResponse, AuthBackendError>;
}

/// Public settings document of the hosted auth backend.
#[derive(Debug, Deserialize)]
struct AuthSettings {
    #[serde(default)]
    external: HashMap<String, Value>,
}

/// Backend error body; different endpoints use different keys.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error_description)
    }
}

/// HTTP client for a hosted (Supabase-compatible) auth backend.
#[derive(Clone)]
pub struct SupabaseAuth {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(auth_url: impl Into<String>, anon_key: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    /// Authorize endpoint that begins the provider redirect.
    pub fn authorize_url(&self, request: &SignInWithOAuth) -> String {
        format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}",
            self.auth_url,
            request.provider.as_str(),
            urlencoding::encode(&request.options.redirect_to)
        )
    }

    async fn fetch_settings(&self) -> Result<AuthSettings, AuthBackendError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/settings", self.auth_url))
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| AuthBackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_message);
            return Err(AuthBackendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<AuthSettings>()
            .await
            .map_err(|e| AuthBackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuth {
    async fn sign_in_with_oauth(
        &self,
        request: &SignInWithOAuth,
    ) -> Result<OAuthResponse, AuthBackendError> {
        let settings = self.fetch_settings().await?;

        let enabled = settings
            .external
            .get(request.provider.as_str())
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !enabled {
            tracing::warn!(provider = %request.provider, "Provider not enabled on auth backend");
            return Ok(OAuthResponse::error(
                "Unsupported provider: provider is not enabled",
            ));
        }

        Ok(OAuthResponse::redirect(self.authorize_url(request)))
    }
}
