// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered HTML pages.

use crate::middleware::auth::{require_page_auth, AuthUser};
use crate::models::SocialProvider;
use crate::services::notifier::take_toast;
use crate::AppState;
use axum::{middleware, response::Html, routing::get, Extension, Router};
use axum_extra::extract::cookie::CookieJar;
use html_escape::encode_text;
use std::fmt::Write as _;
use std::sync::Arc;

/// Public pages (no session required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(public_page))
}

/// Pages that need a session; others are sent back to `/`.
pub fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(state, require_page_auth))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        encode_text(title),
        body
    )
}

/// Public entry page: login buttons plus any pending toast.
async fn public_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, toast) = take_toast(jar);

    let mut body = String::new();
    if let Some(message) = toast {
        let _ = writeln!(
            body,
            "<div class=\"toast toast-error\" role=\"alert\">{}</div>",
            encode_text(&message)
        );
    }
    body.push_str("<main>\n<h1>Sign in</h1>\n<ul class=\"social-login\">\n");
    for provider in SocialProvider::ALL {
        let _ = writeln!(
            body,
            "<li><a href=\"/auth/{}\">Continue with {}</a></li>",
            provider.as_str(),
            provider.label()
        );
    }
    body.push_str("</ul>\n</main>\n");

    (jar, Html(layout("Sign in", &body)))
}

async fn dashboard(Extension(user): Extension<AuthUser>) -> Html<String> {
    let who = user.email.as_deref().unwrap_or(&user.user_id);
    let body = format!(
        "<main>\n<h1>Dashboard</h1>\n<p>Signed in as {}</p>\n<p><a href=\"/auth/logout\">Sign out</a></p>\n</main>\n",
        encode_text(who)
    );
    Html(layout("Dashboard", &body))
}
