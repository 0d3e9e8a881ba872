// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use course_portal::config::Config;
use course_portal::routes::create_router;
use course_portal::services::auth_backend::SignInWithOAuth;
use course_portal::services::directory::FixtureUsers;
use course_portal::services::{AuthBackend, AuthBackendError, OAuthResponse, SocialLoginInitiator};
use course_portal::AppState;
use std::sync::{Arc, Mutex};

/// Auth backend that answers every sign-in with the same scripted result.
pub struct StubAuthBackend {
    response: Result<OAuthResponse, AuthBackendError>,
    calls: Mutex<Vec<SignInWithOAuth>>,
}

#[allow(dead_code)]
impl StubAuthBackend {
    pub fn new(response: Result<OAuthResponse, AuthBackendError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Backend that accepts every provider.
    pub fn accepting() -> Arc<Self> {
        Self::new(Ok(OAuthResponse::redirect(
            "https://auth.example/authorize?provider=stub",
        )))
    }

    pub fn calls(&self) -> Vec<SignInWithOAuth> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthBackend for StubAuthBackend {
    async fn sign_in_with_oauth(
        &self,
        request: &SignInWithOAuth,
    ) -> Result<OAuthResponse, AuthBackendError> {
        self.calls.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

/// Create a test app with offline dependencies and the given auth backend.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_backend(backend: Arc<StubAuthBackend>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let users = Arc::new(FixtureUsers::load().expect("fixture users should parse"));

    let state = Arc::new(AppState {
        config,
        social_login: SocialLoginInitiator::new(backend),
        users,
    });

    (create_router(state.clone()), state)
}

/// Create a test app whose auth backend accepts every sign-in.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_backend(StubAuthBackend::accepting())
}

/// Session token as the auth backend would issue it.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    course_portal::middleware::auth::create_jwt(user_id, Some("student@example.com"), 3600, signing_key)
        .expect("Failed to create JWT")
}

/// Correctly signed session token whose expiry is long past.
#[allow(dead_code)]
pub fn create_expired_jwt(user_id: &str, signing_key: &[u8]) -> String {
    use course_portal::middleware::auth::Claims;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    let claims = Claims {
        sub: user_id.to_string(),
        email: Some("student@example.com".to_string()),
        role: Some("authenticated".to_string()),
        iat: 1_000,
        exp: 2_000,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .expect("Failed to create JWT")
}
