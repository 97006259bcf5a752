//! HTTP Basic authentication against a single configured account.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use std::sync::Arc;

/// Challenge sent with every 401 so browsers show their login prompt.
pub const CHALLENGE: &str = "Basic realm=\"Basic Authentication\"";

// Browsers' `atob` does not insist on padding, so neither do we.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The one account allowed in. Either half missing locks everybody out.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

impl Credentials {
    pub const fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    pub const fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Checks a raw `Authorization` header value.
    pub fn authorize(&self, authorization: Option<&str>) -> bool {
        let (Some(expected_user), Some(expected_password)) = (&self.username, &self.password)
        else {
            return false;
        };

        let Some(token) = authorization.and_then(basic_token) else {
            return false;
        };

        let token: String = token
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let Ok(decoded) = TOKEN_ENGINE.decode(token) else {
            return false;
        };

        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };

        match decoded.split_once(':') {
            Some((user, password)) => user == expected_user && password == expected_password,
            None => false,
        }
    }
}

/// Returns the token of a `Basic <token>` header value.
fn basic_token(authorization: &str) -> Option<&str> {
    let rest = authorization.strip_prefix("Basic")?;

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(rest.trim_start())
}

pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE))],
        "401 Unauthorized",
    )
        .into_response()
}

/// Rejects the request before routing unless it carries the configured account.
pub async fn require_basic_auth(
    State(credentials): State<Arc<Credentials>>,
    request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if !credentials.authorize(authorization) {
        tracing::debug!(
            "Rejected unauthenticated {} {}",
            request.method(),
            request.uri().path()
        );
        return unauthorized();
    }

    next.run(request).await
}
