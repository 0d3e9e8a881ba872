// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social login routes.

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::SESSION_COOKIE;
use crate::models::SocialProvider;
use crate::services::{FlashNotifier, LoginOutcome, Notifier, Route};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", get(logout))
        .route("/auth/{provider}", get(auth_start))
}

/// Start OAuth flow - hand the browser to the provider, or come back to the
/// public page with a toast explaining why not.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let provider: SocialProvider = provider
        .parse()
        .map_err(|e: crate::models::UnknownProvider| AppError::BadRequest(e.to_string()))?;

    match state
        .social_login
        .initiate(provider, &state.config.public_origin)
        .await
    {
        LoginOutcome::Redirect { url } => {
            tracing::info!(provider = %provider, "Redirecting to identity provider");
            Ok((jar, Redirect::to(&url)))
        }
        LoginOutcome::Failed { message } => {
            let notifier = FlashNotifier::new(jar, state.config.secure_cookies());
            notifier.error(&message);
            Ok((notifier.into_jar(), Redirect::to(Route::Public.path())))
        }
    }
}

/// Logout - drop the session cookie and go back to the public page.
async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, Redirect::to(Route::Public.path()))
}
