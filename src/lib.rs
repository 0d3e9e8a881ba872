// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Course Portal: the sign-in and landing surface of a learning portal.
//!
//! This crate hosts the landing redirect, social login initiation through a
//! hosted auth backend, and a paginated user directory served from fixture
//! data or the live data API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;

use config::Config;
use services::{SocialLoginInitiator, UserSource};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub social_login: SocialLoginInitiator,
    pub users: Arc<dyn UserSource>,
}
