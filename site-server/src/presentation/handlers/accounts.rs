use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::page_context;
use crate::application::auth_service::AuthResult;
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::flash::{self, Flash};
use crate::presentation::forms::{FieldErrors, LoginForm, RegisterForm, safe_next};
use crate::presentation::middleware::auth::{CurrentUser, SESSION_COOKIE};
use crate::presentation::views::{self, PageContext};

/// Key for messages that belong to the whole form.
const FORM_ERRORS: &str = "__all__";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NextQuery {
    next: Option<String>,
}

/// Session cookie carrying the access token.
pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn signed_in(state: &AppState, jar: CookieJar, result: AuthResult, notice: Flash, to: &str) -> Response {
    let jar = jar.add(session_cookie(result.access_token, state.cookie_secure));
    (flash::set(jar, notice), Redirect::to(to)).into_response()
}

pub(crate) async fn login_form(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
) -> (CookieJar, Html<String>) {
    let next = safe_next(query.next.as_deref());
    let (jar, ctx) = page_context(user, jar);
    let markup = views::accounts::login(&ctx, "", &next, &FieldErrors::default());
    (jar, Html(markup.into_string()))
}

pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let next = safe_next(Some(&form.next));
    let rerender = |errors: &FieldErrors| {
        let markup = views::accounts::login(&PageContext::default(), &form.username, &next, errors);
        Html(markup.into_string()).into_response()
    };

    if let Err(errors) = form.validate() {
        return Ok(rerender(&FieldErrors::from(&errors)));
    }

    let req = LoginRequest {
        username: form.username.clone(),
        password: form.password.clone(),
    };
    match state.auth_service.login(req).await {
        Ok(result) => {
            info!(user_id = result.user.id, "browser session started");
            Ok(signed_in(&state, jar, result, Flash::SignedIn, &next))
        }
        Err(DomainError::InvalidCredentials) => Ok(rerender(&FieldErrors::single(
            FORM_ERRORS,
            "Please enter a correct username and password.",
        ))),
        Err(DomainError::Validation { field, message }) => {
            Ok(rerender(&FieldErrors::single(field, message)))
        }
        Err(err) => Err(AppError::from(err)),
    }
}

pub(crate) async fn register_form(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(user, jar);
    let markup = views::accounts::register(&ctx, "", "", &FieldErrors::default());
    (jar, Html(markup.into_string()))
}

pub(crate) async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let rerender = |errors: &FieldErrors| {
        let markup =
            views::accounts::register(&PageContext::default(), &form.username, &form.email, errors);
        Html(markup.into_string()).into_response()
    };

    if let Err(errors) = form.validate() {
        return Ok(rerender(&FieldErrors::from(&errors)));
    }

    let req = RegisterRequest {
        username: form.username.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
    };
    match state.auth_service.register(req).await {
        Ok(result) => Ok(signed_in(&state, jar, result, Flash::Registered, "/")),
        Err(DomainError::AlreadyExists(_)) => Ok(rerender(&FieldErrors::single(
            FORM_ERRORS,
            "A user with that username or email already exists.",
        ))),
        Err(DomainError::Validation { field, message }) => {
            Ok(rerender(&FieldErrors::single(field, message)))
        }
        Err(err) => Err(AppError::from(err)),
    }
}

pub(crate) async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (flash::set(jar, Flash::SignedOut), Redirect::to("/"))
}
