// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth_backend;
pub mod directory;
pub mod landing;
pub mod notifier;
pub mod oracle;
pub mod social_login;

pub use auth_backend::{AuthBackend, AuthBackendError, OAuthResponse, SupabaseAuth};
pub use directory::{user_source, UserSource};
pub use landing::{LandingRedirect, Navigator, Route};
pub use notifier::{FlashNotifier, Notifier};
pub use oracle::{AuthStatusOracle, SessionOracle};
pub use social_login::{LoginOutcome, SocialLoginInitiator};
