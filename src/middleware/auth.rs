// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.
//!
//! Sessions are owned by the auth backend: it issues an HS256 access token
//! which the browser carries in the `portal_session` cookie (or, for API
//! clients, as a bearer token). This module only verifies them.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie holding the backend-issued access token.
pub const SESSION_COOKIE: &str = "portal_session";

/// Access token claims issued by the auth backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email address, when the provider shared one
    #[serde(default)]
    pub email: Option<String>,
    /// Backend role claim
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
}

/// Candidate session tokens: the cookie first, then the Authorization header.
pub fn session_tokens(jar: &CookieJar, headers: &HeaderMap) -> Vec<String> {
    let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string());

    cookie.into_iter().chain(bearer).collect()
}

/// Verify a session token. Expired, tampered or malformed tokens yield `None`.
pub fn verify_session(token: &str, secret: &[u8]) -> Option<Claims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    // Backend tokens carry an audience we don't pin.
    validation.validate_aud = false;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) if !data.claims.sub.is_empty() => Some(data.claims),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            None
        }
    }
}

/// First candidate that verifies. A stale cookie does not mask a valid bearer token.
pub fn verify_any(tokens: &[String], secret: &[u8]) -> Option<Claims> {
    tokens.iter().find_map(|t| verify_session(t, secret))
}

fn authenticate(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> Option<AuthUser> {
    let claims = verify_any(&session_tokens(jar, headers), &state.config.auth_jwt_secret)?;
    Some(AuthUser {
        user_id: claims.sub,
        email: claims.email,
    })
}

/// Middleware that requires a valid session for API routes.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate(&state, &jar, request.headers()).ok_or(AppError::Unauthorized)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Middleware for HTML pages: visitors without a session go back to `/`.
pub async fn require_page_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar, request.headers()) {
        Some(auth_user) => {
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        None => Redirect::to("/").into_response(),
    }
}

/// Create a session token the way the auth backend does.
///
/// Used by local tooling and tests; production tokens come from the backend.
pub fn create_jwt(
    user_id: &str,
    email: Option<&str>,
    ttl_secs: usize,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(|e| e.to_string()),
        role: Some("authenticated".to_string()),
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"unit_test_secret_key_0123456789!";

    #[test]
    fn test_verify_roundtrip() {
        let token = create_jwt("user-1", Some("a@b.c"), 3600, KEY).unwrap();
        let claims = verify_session(&token, KEY).expect("token should verify");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let token = create_jwt("user-1", None, 3600, KEY).unwrap();
        assert!(verify_session(&token, b"some_other_key_0123456789abcdef!").is_none());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_session("not.a.jwt", KEY).is_none());
        assert!(verify_session("", KEY).is_none());
    }

    #[test]
    fn test_verify_rejects_expired() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let claims = Claims {
            sub: "user-1".to_string(),
            email: None,
            role: None,
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();

        assert!(verify_session(&token, KEY).is_none());
    }

    #[test]
    fn test_session_tokens_order() {
        let jar = CookieJar::new().add(axum_extra::extract::cookie::Cookie::new(
            SESSION_COOKIE,
            "from-cookie",
        ));
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());

        assert_eq!(session_tokens(&jar, &headers), vec!["from-cookie", "from-header"]);
        assert_eq!(session_tokens(&CookieJar::new(), &headers), vec!["from-header"]);
        assert!(session_tokens(&CookieJar::new(), &HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_verify_any_skips_stale_cookie() {
        let valid = create_jwt("user-2", None, 3600, KEY).unwrap();
        let tokens = vec!["stale-garbage".to_string(), valid];

        let claims = verify_any(&tokens, KEY).expect("bearer token should verify");
        assert_eq!(claims.sub, "user-2");
        assert!(verify_any(&tokens[..1], KEY).is_none());
    }
}
