// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient user notifications ("toasts").
//!
//! Over HTTP a toast is a flash cookie: set on one response, shown and
//! cleared by the next page render.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Mutex;
use time::Duration;

/// Cookie carrying a pending toast message.
pub const TOAST_COOKIE: &str = "portal_toast";
const TOAST_MAX_AGE_SECS: i64 = 60;

/// Fire-and-forget error reporting.
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Collects messages in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Queues a toast into the outgoing cookie jar.
pub struct FlashNotifier {
    jar: Mutex<Option<CookieJar>>,
    secure: bool,
}

impl FlashNotifier {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self {
            jar: Mutex::new(Some(jar)),
            secure,
        }
    }

    /// Jar to send back with the response.
    pub fn into_jar(self) -> CookieJar {
        self.jar
            .into_inner()
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

impl Notifier for FlashNotifier {
    fn error(&self, message: &str) {
        let Ok(mut guard) = self.jar.lock() else {
            return;
        };
        let jar = guard.take().unwrap_or_default();
        let cookie = Cookie::build((TOAST_COOKIE, urlencoding::encode(message).into_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::seconds(TOAST_MAX_AGE_SECS));
        *guard = Some(jar.add(cookie));
    }
}

/// Take the pending toast, if any, and return the jar with it cleared.
pub fn take_toast(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(TOAST_COOKIE) else {
        return (jar, None);
    };

    let message = urlencoding::decode(cookie.value())
        .map(|m| m.into_owned())
        .ok()
        .filter(|m| !m.is_empty());
    let jar = jar.remove(Cookie::build((TOAST_COOKIE, "")).path("/"));

    (jar, message)
}
