use axum::Router;

use super::AppState;

pub(crate) mod accounts;
pub(crate) mod animations;
pub(crate) mod posts;
pub(crate) mod spa;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(posts::router())
        .merge(spa::router())
        .merge(animations::router())
        .merge(accounts::router())
}
