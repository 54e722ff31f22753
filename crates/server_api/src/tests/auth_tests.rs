use std::time::Duration;

use storage::EntityStore;
use tokio::time::Instant;

use super::*;
use crate::SiteConfig;

fn credentials(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

fn redirect_to(path: &str) -> RedirectQuery {
    RedirectQuery {
        redirect: Some(path.into()),
    }
}

#[tokio::test(start_paused = true)]
async fn login_waits_then_goes_to_the_dashboard() {
    let ctx = ApiContext::new(EntityStore::seeded(), SiteConfig::default());
    let started = Instant::now();
    let outcome = login(
        &ctx,
        credentials("admin@prassanna.com", "secret"),
        &RedirectQuery::default(),
    )
    .await
    .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(800));
    assert_eq!(outcome.redirect, "/admin/dashboard");
    assert_eq!(outcome.notice, Notice::success("Successfully logged in!"));
}

#[tokio::test]
async fn login_follows_the_requested_redirect() {
    let ctx = ApiContext::new(EntityStore::seeded(), SiteConfig::instant());
    let outcome = login(
        &ctx,
        credentials("a@b.co", "x"),
        &redirect_to("/admin/settings"),
    )
    .await
    .unwrap();
    assert_eq!(outcome.redirect, "/admin/settings");
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let ctx = ApiContext::new(EntityStore::seeded(), SiteConfig::instant());
    let err = login(&ctx, credentials("admin@prassanna.com", ""), &RedirectQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "Please fill in all fields");
}

#[test]
fn off_site_redirects_fall_back_to_the_dashboard() {
    assert_eq!(login_redirect(Some("https://evil.example")), DEFAULT_LOGIN_REDIRECT);
    assert_eq!(login_redirect(Some("//evil.example/x")), DEFAULT_LOGIN_REDIRECT);
    assert_eq!(login_redirect(Some("/\\evil.example")), DEFAULT_LOGIN_REDIRECT);
    assert_eq!(login_redirect(Some("/\\/evil.example")), DEFAULT_LOGIN_REDIRECT);
    assert_eq!(login_redirect(None), DEFAULT_LOGIN_REDIRECT);
    assert_eq!(login_redirect(Some("/dashboard/webinars")), "/dashboard/webinars");
}

#[test]
fn login_page_carries_the_redirect() {
    let page = login_page(&redirect_to("/admin/trainers"));
    assert_eq!(page.redirect, "/admin/trainers");
    assert_eq!(page.submit_to, "/login?redirect=/admin/trainers");
}
