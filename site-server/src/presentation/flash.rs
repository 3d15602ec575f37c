//! One-shot notices shown on the next rendered page.
//!
//! The cookie only carries a short code; the text lives here.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Error,
}

impl Level {
    pub(crate) fn css_class(self) -> &'static str {
        match self {
            Level::Success => "alert alert-success",
            Level::Error => "alert alert-danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flash {
    PostCreated,
    PostUpdated,
    PostDeleted,
    EditForbidden,
    DeleteForbidden,
    SignedIn,
    SignedOut,
    Registered,
}

impl Flash {
    const ALL: [Flash; 8] = [
        Flash::PostCreated,
        Flash::PostUpdated,
        Flash::PostDeleted,
        Flash::EditForbidden,
        Flash::DeleteForbidden,
        Flash::SignedIn,
        Flash::SignedOut,
        Flash::Registered,
    ];

    fn code(self) -> &'static str {
        match self {
            Flash::PostCreated => "post-created",
            Flash::PostUpdated => "post-updated",
            Flash::PostDeleted => "post-deleted",
            Flash::EditForbidden => "edit-forbidden",
            Flash::DeleteForbidden => "delete-forbidden",
            Flash::SignedIn => "signed-in",
            Flash::SignedOut => "signed-out",
            Flash::Registered => "registered",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub(crate) fn level(self) -> Level {
        match self {
            Flash::EditForbidden | Flash::DeleteForbidden => Level::Error,
            _ => Level::Success,
        }
    }

    pub(crate) fn message(self) -> &'static str {
        match self {
            Flash::PostCreated => "Post created.",
            Flash::PostUpdated => "Post updated.",
            Flash::PostDeleted => "Post deleted.",
            Flash::EditForbidden => "You are not allowed to edit this post.",
            Flash::DeleteForbidden => "You are not allowed to delete this post.",
            Flash::SignedIn => "Signed in.",
            Flash::SignedOut => "Signed out.",
            Flash::Registered => "Account created, welcome!",
        }
    }
}

pub(crate) fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads and clears the pending notice.
pub(crate) fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(flash) = jar.get(FLASH_COOKIE).map(|cookie| Flash::from_code(cookie.value())) else {
        return (jar, None);
    };
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::CookieJar;

    use super::{FLASH_COOKIE, Flash, Level, set, take};

    #[test]
    fn codes_round_trip_for_every_notice() {
        for flash in Flash::ALL {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("<script>"), None);
    }

    #[test]
    fn forbidden_notices_are_errors() {
        assert_eq!(Flash::EditForbidden.level(), Level::Error);
        assert_eq!(Flash::DeleteForbidden.level(), Level::Error);
        assert_eq!(Flash::PostCreated.level(), Level::Success);
    }

    #[test]
    fn take_consumes_the_notice() {
        let jar = set(CookieJar::new(), Flash::PostDeleted);
        assert_eq!(
            jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_string()),
            Some("post-deleted".to_string())
        );

        let (jar, flash) = take(jar);
        assert_eq!(flash, Some(Flash::PostDeleted));
        assert!(jar.get(FLASH_COOKIE).is_none());

        let (_, flash) = take(jar);
        assert_eq!(flash, None);
    }
}
