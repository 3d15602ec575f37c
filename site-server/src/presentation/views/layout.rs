use maud::{DOCTYPE, Markup, html};

use crate::presentation::flash::Flash;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Per-request data every page needs.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageContext {
    pub(crate) user: Option<AuthenticatedUser>,
    pub(crate) flash: Option<Flash>,
}

impl PageContext {
    pub(crate) fn new(user: Option<AuthenticatedUser>, flash: Option<Flash>) -> Self {
        Self { user, flash }
    }
}

pub(crate) fn page(title: &str, ctx: &PageContext, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Site" }
            }
            body {
                nav.navbar {
                    a.brand href="/" { "Blog" }
                    a href="/spa/" { "SPA demo" }
                    a href="/animations/" { "Animations" }
                    @if let Some(user) = &ctx.user {
                        a href="/post/new/" { "New post" }
                        a href={ "/user/" (urlencoding::encode(&user.username)) "/" } { (user.username) }
                        form.inline method="post" action="/accounts/logout/" {
                            button type="submit" { "Log out" }
                        }
                    } @else {
                        a href="/accounts/login/" { "Log in" }
                        a href="/accounts/register/" { "Register" }
                    }
                }
                @if let Some(flash) = ctx.flash {
                    div class=(flash.level().css_class()) role="alert" { (flash.message()) }
                }
                main.container { (body) }
            }
        }
    }
}
