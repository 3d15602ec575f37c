use maud::{Markup, html};

use super::layout::{PageContext, page};
use crate::domain::section::section_count;

const SECTION_LOADER: &str = r#"
function showSection(section, push) {
    fetch('/spa/sections/' + section)
        .then(function (response) { return response.ok ? response.text() : ''; })
        .then(function (text) {
            document.querySelector('#content').textContent = text;
            if (push) {
                history.pushState({ section: section }, '', '/spa/section' + section);
            }
        });
}
document.querySelectorAll('[data-section]').forEach(function (button) {
    button.onclick = function () { showSection(this.dataset.section, true); };
});
window.onpopstate = function (event) {
    if (event.state && event.state.section) {
        showSection(event.state.section, false);
    }
};
var deepLink = window.location.pathname.match(/^\/spa\/section(\d+)\/?$/);
if (deepLink) {
    history.replaceState({ section: deepLink[1] }, '', window.location.pathname);
    showSection(deepLink[1], false);
}
"#;

const GAME_LOOP: &str = r#"
var canvas = document.getElementById('game');
var ctx = canvas.getContext('2d');
var player = { x: 220, y: 140, size: 40, speed: 6 };
var held = {};
window.addEventListener('keydown', function (event) {
    if (event.key.indexOf('Arrow') === 0) { held[event.key] = true; event.preventDefault(); }
});
window.addEventListener('keyup', function (event) { held[event.key] = false; });
function step() {
    if (held.ArrowLeft) { player.x -= player.speed; }
    if (held.ArrowRight) { player.x += player.speed; }
    if (held.ArrowUp) { player.y -= player.speed; }
    if (held.ArrowDown) { player.y += player.speed; }
    player.x = Math.max(0, Math.min(canvas.width - player.size, player.x));
    player.y = Math.max(0, Math.min(canvas.height - player.size, player.y));
    ctx.clearRect(0, 0, canvas.width, canvas.height);
    ctx.fillStyle = '#2b7de9';
    ctx.fillRect(player.x, player.y, player.size, player.size);
    window.requestAnimationFrame(step);
}
window.requestAnimationFrame(step);
"#;

pub(crate) fn index(ctx: &PageContext) -> Markup {
    let body = html! {
        h1 { "Single page navigation" }
        nav.sections {
            @for number in 1..=section_count() {
                button type="button" data-section=(number) { "Section " (number) }
                " "
            }
            a href="/spa/game/" { "Game" }
        }
        div id="content" {}
        script { (maud::PreEscaped(SECTION_LOADER)) }
    };
    page("Single page", ctx, body)
}

pub(crate) fn game(ctx: &PageContext) -> Markup {
    let body = html! {
        h1 { "Game" }
        canvas id="game" width="480" height="320" {}
        p { "Use the arrow keys to move the square." }
        script { (maud::PreEscaped(GAME_LOOP)) }
        p { a href="/spa/" { "Back" } }
    };
    page("Game", ctx, body)
}

#[cfg(test)]
mod tests {
    use super::{game, index};
    use crate::presentation::views::PageContext;

    #[test]
    fn shell_loads_the_section_named_in_the_path() {
        let html = index(&PageContext::default()).into_string();
        assert!(html.contains(r"window.location.pathname.match(/^\/spa\/section(\d+)\/?$/)"));
        assert!(html.contains("showSection(deepLink[1], false)"));
        assert!(html.contains("data-section=\"3\""));
    }

    #[test]
    fn game_page_ships_its_loop() {
        let html = game(&PageContext::default()).into_string();
        assert!(html.contains("id=\"game\""));
        assert!(html.contains("requestAnimationFrame(step)"));
        assert!(html.contains("ArrowLeft"));
    }
}
