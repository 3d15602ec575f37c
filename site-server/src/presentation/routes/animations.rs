use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::animations;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/animations/", get(animations::index))
        .route("/animations/types", get(animations::types))
        .route("/animations/interactive", get(animations::interactive))
}
