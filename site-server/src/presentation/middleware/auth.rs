use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::presentation::AppState;

/// Cookie holding the access token for browser sessions.
pub(crate) const SESSION_COOKIE: &str = "access_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
    pub(crate) username: String,
}

/// Requires a signed-in user; anonymous visitors are sent to the login page.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                let next = parts
                    .uri
                    .path_and_query()
                    .map_or("/", |value| value.as_str());
                Redirect::to(&login_url(next))
            })
    }
}

/// The signed-in user, if any.
#[derive(Debug, Clone, Default)]
pub(crate) struct CurrentUser(pub(crate) Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

pub(crate) fn login_url(next: &str) -> String {
    format!("/accounts/login/?next={}", urlencoding::encode(next))
}

/// Resolves the caller from a bearer token or the session cookie.
/// Missing or invalid tokens leave the request anonymous.
pub(crate) async fn identify_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).or_else(|| {
        CookieJar::from_headers(request.headers())
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    });

    if let Some(token) = token {
        match state.auth_service.jwt().verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthenticatedUser {
                    user_id: claims.user_id,
                    username: claims.username,
                });
            }
            Err(err) => debug!(error = %err, "ignoring invalid access token"),
        }
    }

    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = raw.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{bearer_token, login_url};

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_requires_scheme_and_single_token() {
        assert_eq!(bearer_token(&headers("Bearer abc")).as_deref(), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer abc")).as_deref(), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer a b")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn login_url_encodes_next() {
        assert_eq!(
            login_url("/post/1/update/?x=1"),
            "/accounts/login/?next=%2Fpost%2F1%2Fupdate%2F%3Fx%3D1"
        );
    }
}
