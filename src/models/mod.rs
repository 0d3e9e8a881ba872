// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod provider;
pub mod user;

pub use provider::{SocialProvider, UnknownProvider};
pub use user::User;
