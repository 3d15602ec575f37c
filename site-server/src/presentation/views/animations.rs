use maud::{Markup, html};

use super::layout::{PageContext, page};

pub(crate) fn index(ctx: &PageContext) -> Markup {
    let body = html! {
        h1 { "Animations" }
        ul {
            li { a href="/animations/types" { "Animation types" } }
            li { a href="/animations/interactive" { "Interactive animations" } }
        }
    };
    page("Animations", ctx, body)
}

pub(crate) fn types(ctx: &PageContext) -> Markup {
    let kinds = [
        ("fade", "Opacity transitions"),
        ("slide", "Translate along an axis"),
        ("rotate", "Spin around the centre"),
        ("scale", "Grow and shrink"),
    ];
    let body = html! {
        h1 { "Animation types" }
        div.animation-grid {
            @for (class, label) in kinds {
                div class={ "demo " (class) } { (label) }
            }
        }
    };
    page("Animation types", ctx, body)
}

pub(crate) fn interactive(ctx: &PageContext) -> Markup {
    let body = html! {
        h1 { "Interactive animations" }
        div.demo.hover-grow { "Hover me" }
        button.demo.click-bounce type="button" { "Click me" }
        div.demo.draggable draggable="true" { "Drag me" }
    };
    page("Interactive animations", ctx, body)
}
