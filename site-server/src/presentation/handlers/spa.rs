use axum::{
    extract::Path,
    http::header,
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;

use super::page_context;
use crate::domain::section::section;
use crate::presentation::app_error::{AppError, AppResult, parse_path_id};
use crate::presentation::middleware::auth::CurrentUser;
use crate::presentation::views;

pub(crate) async fn index(CurrentUser(user): CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(user, jar);
    (jar, Html(views::spa::index(&ctx).into_string()))
}

/// Plain-text body of one section, fetched by the index page.
pub(crate) async fn section_text(Path(raw): Path<String>) -> AppResult<impl IntoResponse> {
    let text = section(parse_path_id(&raw)?).ok_or(AppError::NotFound)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// `/spa/section{N}` deep links render the shell, which loads the section itself.
pub(crate) async fn section_page(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(page): Path<String>,
) -> AppResult<(CookieJar, Html<String>)> {
    let number = page
        .strip_prefix("section")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .ok_or(AppError::NotFound)?;
    parse_path_id(number)?;
    Ok(index(CurrentUser(user), jar).await)
}

pub(crate) async fn game(CurrentUser(user): CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(user, jar);
    (jar, Html(views::spa::game(&ctx).into_string()))
}
