// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social login initiation.
//!
//! Starting a login never fails from the caller's point of view: the backend
//! either hands back a URL to follow, or we hand back a message to show.
//! Showing it is the caller's job.

use crate::models::SocialProvider;
use crate::services::auth_backend::{AuthBackend, OAuthOptions, SignInWithOAuth};
use crate::services::landing::Route;
use std::sync::Arc;

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Send the browser here; control leaves the app.
    Redirect { url: String },
    /// Stay put and tell the user.
    Failed { message: String },
}

/// Message used when the backend gives us nothing better.
pub fn fallback_message(provider: SocialProvider) -> String {
    format!("Could not sign in with {}. Please try again.", provider)
}

/// Where the provider returns the browser after sign-in.
pub fn post_login_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), Route::Dashboard.path())
}

#[derive(Clone)]
pub struct SocialLoginInitiator {
    backend: Arc<dyn AuthBackend>,
}

impl SocialLoginInitiator {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }

    /// Ask the backend to start an OAuth redirect for `provider`.
    ///
    /// `origin` is the scheme/host/port the app is served from.
    pub async fn initiate(&self, provider: SocialProvider, origin: &str) -> LoginOutcome {
        let request = SignInWithOAuth {
            provider,
            options: OAuthOptions {
                redirect_to: post_login_url(origin),
            },
        };

        tracing::info!(
            provider = %provider,
            redirect_to = %request.options.redirect_to,
            "Starting social login"
        );

        match self.backend.sign_in_with_oauth(&request).await {
            Ok(response) => match (response.error, response.url) {
                (Some(err), _) => {
                    tracing::warn!(provider = %provider, error = %err.message, "Sign-in refused");
                    let message = if err.message.trim().is_empty() {
                        fallback_message(provider)
                    } else {
                        err.message
                    };
                    LoginOutcome::Failed { message }
                }
                (None, Some(url)) => LoginOutcome::Redirect { url },
                (None, None) => {
                    tracing::warn!(provider = %provider, "Sign-in returned neither URL nor error");
                    LoginOutcome::Failed {
                        message: fallback_message(provider),
                    }
                }
            },
            Err(e) => {
                tracing::error!(provider = %provider, error = %e, "Sign-in request failed");
                LoginOutcome::Failed {
                    message: e
                        .user_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| fallback_message(provider)),
                }
            }
        }
    }
}
