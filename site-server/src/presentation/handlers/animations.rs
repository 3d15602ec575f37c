use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use super::page_context;
use crate::presentation::middleware::auth::CurrentUser;
use crate::presentation::views;

pub(crate) async fn index(CurrentUser(user): CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(user, jar);
    (jar, Html(views::animations::index(&ctx).into_string()))
}

pub(crate) async fn types(CurrentUser(user): CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(user, jar);
    (jar, Html(views::animations::types(&ctx).into_string()))
}

pub(crate) async fn interactive(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(user, jar);
    (jar, Html(views::animations::interactive(&ctx).into_string()))
}
