// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social login initiation tests.
//!
//! Sign-in either yields a provider URL or a message for the user; the
//! backend's failures never escape as errors.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::StubAuthBackend;
use course_portal::models::SocialProvider;
use course_portal::services::notifier::RecordingNotifier;
use course_portal::services::social_login::fallback_message;
use course_portal::services::{
    AuthBackendError, LoginOutcome, Notifier, OAuthResponse, SocialLoginInitiator,
};
use tower::ServiceExt;

mod common;

const ORIGIN: &str = "https://learn.example.com";

#[tokio::test]
async fn test_every_provider_requests_dashboard_redirect() {
    let backend = StubAuthBackend::accepting();
    let initiator = SocialLoginInitiator::new(backend.clone());

    for provider in SocialProvider::ALL {
        let outcome = initiator.initiate(provider, ORIGIN).await;
        assert!(matches!(outcome, LoginOutcome::Redirect { .. }));
    }

    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    for (call, provider) in calls.iter().zip(SocialProvider::ALL) {
        assert_eq!(call.provider, provider);
        assert_eq!(call.options.redirect_to, "https://learn.example.com/dashboard");
    }
}

#[tokio::test]
async fn test_backend_error_message_is_passed_through() {
    let backend = StubAuthBackend::new(Ok(OAuthResponse::error("popup_closed")));
    let initiator = SocialLoginInitiator::new(backend);
    let notifier = RecordingNotifier::default();

    // Caller-side contract: notify on failure, navigate only on success.
    let mut navigations = Vec::new();
    match initiator.initiate(SocialProvider::Google, ORIGIN).await {
        LoginOutcome::Redirect { url } => navigations.push(url),
        LoginOutcome::Failed { message } => notifier.error(&message),
    }

    assert_eq!(notifier.messages(), vec!["popup_closed"]);
    assert!(navigations.is_empty());
}

#[tokio::test]
async fn test_backend_failure_without_message_uses_fallback() {
    let backend = StubAuthBackend::new(Err(AuthBackendError::Transport(
        "connection reset".to_string(),
    )));
    let initiator = SocialLoginInitiator::new(backend);

    let outcome = initiator.initiate(SocialProvider::Github, ORIGIN).await;

    match outcome {
        LoginOutcome::Failed { message } => {
            assert_eq!(message, fallback_message(SocialProvider::Github));
            assert!(message.contains("github"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejection_with_message_is_shown() {
    let backend = StubAuthBackend::new(Err(AuthBackendError::Rejected {
        status: 401,
        message: Some("Invalid API key".to_string()),
    }));
    let initiator = SocialLoginInitiator::new(backend);

    let outcome = initiator.initiate(SocialProvider::Facebook, ORIGIN).await;

    assert_eq!(
        outcome,
        LoginOutcome::Failed {
            message: "Invalid API key".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_response_is_a_failure() {
    let backend = StubAuthBackend::new(Ok(OAuthResponse::default()));
    let initiator = SocialLoginInitiator::new(backend);

    let outcome = initiator.initiate(SocialProvider::Google, ORIGIN).await;

    assert_eq!(
        outcome,
        LoginOutcome::Failed {
            message: fallback_message(SocialProvider::Google)
        }
    );
}

#[tokio::test]
async fn test_success_is_silent() {
    let backend = StubAuthBackend::accepting();
    let initiator = SocialLoginInitiator::new(backend);
    let notifier = RecordingNotifier::default();

    if let LoginOutcome::Failed { message } = initiator.initiate(SocialProvider::Google, ORIGIN).await
    {
        notifier.error(&message);
    }

    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_http_login_redirects_to_provider() {
    let backend = StubAuthBackend::accepting();
    let (app, state) = common::create_test_app_with_backend(backend.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://auth.example/authorize?provider=stub"
    );
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].options.redirect_to,
        format!("{}/dashboard", state.config.public_origin)
    );
}

#[tokio::test]
async fn test_http_login_failure_sets_toast_and_returns_home() {
    let backend = StubAuthBackend::new(Ok(OAuthResponse::error("popup_closed")));
    let (app, _) = common::create_test_app_with_backend(backend);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("portal_toast=popup_closed"));
    assert!(cookies[0].contains("HttpOnly"));
}

#[tokio::test]
async fn test_http_login_unknown_provider_is_bad_request() {
    let backend = StubAuthBackend::accepting();
    let (app, _) = common::create_test_app_with_backend(backend.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/myspace")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}
