// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::pagination::{Page, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/users", get(list_users))
}

// ─── Session ─────────────────────────────────────────────────

/// Current session response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user_id: String,
    pub email: Option<String>,
}

async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
        email: user.email,
    })
}

// ─── User Directory ──────────────────────────────────────────

#[derive(Deserialize)]
struct UsersQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn validate_paging(page: u32, per_page: u32) -> Result<()> {
    if page == 0 {
        return Err(AppError::BadRequest("page must be at least 1".to_string()));
    }
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(AppError::BadRequest(format!(
            "per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }
    Ok(())
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<UsersQuery>,
) -> Result<Json<Page<User>>> {
    validate_paging(params.page, params.per_page)?;

    let users = state.users.list_users().await?;
    tracing::debug!(
        user_id = %user.user_id,
        total = users.len(),
        page = params.page,
        "Listing users"
    );

    Ok(Json(Page::from_slice(&users, params.per_page, params.page)))
}
