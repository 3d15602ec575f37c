use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::{accounts, auth};

/// Browser forms under `/accounts`, token endpoints under `/api/auth`.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/login/",
            get(accounts::login_form).post(accounts::login),
        )
        .route(
            "/accounts/register/",
            get(accounts::register_form).post(accounts::register),
        )
        .route("/accounts/logout/", post(accounts::logout))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}
