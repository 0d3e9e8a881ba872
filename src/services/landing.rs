// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Landing page redirect controller.
//!
//! The landing page only dispatches the visitor: signed-in visitors go to the
//! dashboard, everyone else to the public page. Each mount issues exactly one
//! navigation; re-checks that reach the same answer issue nothing.

use super::oracle::AuthStatusOracle;

/// Logical navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Authenticated area
    Dashboard,
    /// Public entry page
    Public,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Public => "/",
        }
    }
}

/// Navigation capability provided by the host.
pub trait Navigator {
    fn navigate(&mut self, to: Route);
}

/// Navigator that remembers every target it was asked to go to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<Route>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<Route> {
        self.visited.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, to: Route) {
        self.visited.push(to);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingState {
    Unresolved,
    Redirected(Route),
}

/// Placeholder shown until the redirect lands.
pub const PLACEHOLDER_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Redirecting…</title></head>
<body><main><p role="status">Redirecting…</p></main></body>
</html>
"#;

#[derive(Debug)]
pub struct LandingRedirect {
    state: LandingState,
}

impl Default for LandingRedirect {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingRedirect {
    pub fn new() -> Self {
        Self {
            state: LandingState::Unresolved,
        }
    }

    pub fn state(&self) -> LandingState {
        self.state
    }

    /// Run the check for a freshly mounted page.
    pub fn mount(&mut self, oracle: &dyn AuthStatusOracle, navigator: &mut dyn Navigator) -> Route {
        self.evaluate(oracle, navigator)
    }

    /// Re-run the check after the host swapped its navigation capability.
    ///
    /// Navigates again only if the answer differs from the one already acted on.
    pub fn navigator_changed(
        &mut self,
        oracle: &dyn AuthStatusOracle,
        navigator: &mut dyn Navigator,
    ) -> Route {
        self.evaluate(oracle, navigator)
    }

    fn evaluate(&mut self, oracle: &dyn AuthStatusOracle, navigator: &mut dyn Navigator) -> Route {
        let target = if oracle.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Public
        };

        if self.state != LandingState::Redirected(target) {
            tracing::debug!(to = target.path(), "Landing redirect");
            navigator.navigate(target);
            self.state = LandingState::Redirected(target);
        }

        target
    }

    /// Markup for the current state: the placeholder until resolved.
    pub fn render(&self) -> Option<&'static str> {
        match self.state {
            LandingState::Unresolved => Some(PLACEHOLDER_HTML),
            LandingState::Redirected(_) => None,
        }
    }
}
