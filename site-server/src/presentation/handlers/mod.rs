use axum_extra::extract::cookie::CookieJar;

use super::flash;
use super::middleware::auth::AuthenticatedUser;
use super::views::PageContext;

pub(crate) mod accounts;
pub(crate) mod animations;
pub(crate) mod api;
pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod spa;

/// Consumes any pending flash notice into the page context.
pub(crate) fn page_context(
    user: Option<AuthenticatedUser>,
    jar: CookieJar,
) -> (CookieJar, PageContext) {
    let (jar, notice) = flash::take(jar);
    (jar, PageContext::new(user, notice))
}
