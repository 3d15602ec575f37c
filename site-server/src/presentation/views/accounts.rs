use maud::{Markup, html};

use super::layout::{PageContext, page};
use crate::presentation::forms::FieldErrors;

fn errors_for(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @for message in errors.for_field(field) {
            p.field-error { (message) }
        }
    }
}

pub(crate) fn login(ctx: &PageContext, username: &str, next: &str, errors: &FieldErrors) -> Markup {
    let body = html! {
        h1 { "Log in" }
        (errors_for(errors, "__all__"))
        form.login-form method="post" action="/accounts/login/" {
            input type="hidden" name="next" value=(next);
            label for="username" { "Username" }
            input id="username" type="text" name="username" value=(username) autofocus;
            (errors_for(errors, "username"))
            label for="password" { "Password" }
            input id="password" type="password" name="password";
            (errors_for(errors, "password"))
            button type="submit" { "Log in" }
        }
        p { "No account yet? " a href="/accounts/register/" { "Register" } }
    };
    page("Log in", ctx, body)
}

pub(crate) fn register(
    ctx: &PageContext,
    username: &str,
    email: &str,
    errors: &FieldErrors,
) -> Markup {
    let body = html! {
        h1 { "Create an account" }
        (errors_for(errors, "__all__"))
        form.register-form method="post" action="/accounts/register/" {
            label for="username" { "Username" }
            input id="username" type="text" name="username" value=(username);
            (errors_for(errors, "username"))
            label for="email" { "Email" }
            input id="email" type="email" name="email" value=(email);
            (errors_for(errors, "email"))
            label for="password" { "Password" }
            input id="password" type="password" name="password";
            (errors_for(errors, "password"))
            button type="submit" { "Register" }
        }
    };
    page("Register", ctx, body)
}
