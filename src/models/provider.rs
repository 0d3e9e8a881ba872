// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supported OAuth identity providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Github,
    Facebook,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 3] = [
        SocialProvider::Google,
        SocialProvider::Github,
        SocialProvider::Facebook,
    ];

    /// Wire tag understood by the auth backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Github => "github",
            SocialProvider::Facebook => "facebook",
        }
    }

    /// Human-readable label for buttons.
    pub fn label(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Github => "GitHub",
            SocialProvider::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for SocialProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
