// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Landing page: sends each visitor where they belong.

use crate::services::landing::{LandingRedirect, RecordingNavigator, PLACEHOLDER_HTML};
use crate::services::SessionOracle;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/landing", get(landing))
}

/// One request is one mount: resolve once, redirect, and send the
/// placeholder as the body for clients that don't follow redirects.
async fn landing(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    let oracle = SessionOracle::from_request(&jar, &headers, &state.config.auth_jwt_secret);

    let mut controller = LandingRedirect::new();
    let placeholder = controller.render().unwrap_or(PLACEHOLDER_HTML);
    let mut navigator = RecordingNavigator::default();
    let target = controller.mount(&oracle, &mut navigator);

    (
        StatusCode::TEMPORARY_REDIRECT,
        [
            (header::LOCATION, target.path()),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Html(placeholder),
    )
        .into_response()
}
