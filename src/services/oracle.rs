// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! "Is the current visitor signed in?"
//!
//! The answer is a plain `bool`: there is no error path. Anything that keeps
//! us from confirming a session (no cookie, bad signature, expired token)
//! counts as signed out.

use crate::middleware::auth::{session_tokens, verify_any};
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

/// Synchronous query for the visitor's authentication state.
pub trait AuthStatusOracle {
    fn is_authenticated(&self) -> bool;
}

/// Oracle backed by the session token the auth backend left on the request.
pub struct SessionOracle<'a> {
    tokens: Vec<String>,
    secret: &'a [u8],
}

impl<'a> SessionOracle<'a> {
    pub fn new(token: Option<String>, secret: &'a [u8]) -> Self {
        Self {
            tokens: token.into_iter().collect(),
            secret,
        }
    }

    /// Build from the incoming request's cookies and headers.
    pub fn from_request(jar: &CookieJar, headers: &HeaderMap, secret: &'a [u8]) -> Self {
        Self {
            tokens: session_tokens(jar, headers),
            secret,
        }
    }
}

impl AuthStatusOracle for SessionOracle<'_> {
    fn is_authenticated(&self) -> bool {
        verify_any(&self.tokens, self.secret).is_some()
    }
}

/// Oracle with a predetermined answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedOracle(pub bool);

impl AuthStatusOracle for FixedOracle {
    fn is_authenticated(&self) -> bool {
        self.0
    }
}
