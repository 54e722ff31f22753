//! Demo login. Any non-empty credentials are accepted.

use serde::{Deserialize, Serialize};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{LoginRequest, Notice, Outcome},
};
use tokio::time::sleep;
use tracing::info;

use crate::ApiContext;

pub const DEFAULT_LOGIN_REDIRECT: &str = "/admin/dashboard";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectQuery {
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub title: &'static str,
    pub submit_to: String,
    pub redirect: String,
}

/// Only same-site absolute paths are followed after login; anything else
/// falls back to the admin dashboard.
pub fn login_redirect(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(path) if is_local_path(path) => path.to_string(),
        _ => DEFAULT_LOGIN_REDIRECT.to_string(),
    }
}

pub fn login_page(query: &RedirectQuery) -> LoginPage {
    let redirect = login_redirect(query.redirect.as_deref());
    LoginPage {
        title: "Admin Login",
        submit_to: format!("/login?redirect={redirect}"),
        redirect,
    }
}

/// Waits out the simulated round trip, then checks that both fields were
/// filled in.
pub async fn login(
    ctx: &ApiContext,
    request: LoginRequest,
    query: &RedirectQuery,
) -> Result<Outcome, ApiError> {
    sleep(ctx.site.login_delay).await;

    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "Please fill in all fields",
        ));
    }

    let redirect = login_redirect(query.redirect.as_deref());
    info!(email = %request.email, %redirect, "admin logged in");
    Ok(Outcome::new(
        redirect,
        Notice::success("Successfully logged in!"),
    ))
}

/// Browsers treat `\` like `/`, so `/\host` is as off-site as `//host`.
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
