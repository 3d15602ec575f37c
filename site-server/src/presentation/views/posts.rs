use maud::{Markup, html};

use super::layout::{PageContext, page};
use crate::domain::pagination::{Page, PageWindow};
use crate::domain::post::Post;
use crate::presentation::forms::{FieldErrors, PostForm};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn user_url(username: &str) -> String {
    format!("/user/{}/", urlencoding::encode(username))
}

fn category_url(category: &str) -> String {
    format!("/category/{}/", urlencoding::encode(category))
}

/// Previous/next links; `extra_query` is appended to every page link.
fn pagination(window: &PageWindow, extra_query: &str) -> Markup {
    let link = |number: u32| format!("?page={number}{extra_query}");
    html! {
        nav.pagination {
            @if let Some(previous) = window.previous_number() {
                a href=(link(1)) { "« first" }
                " "
                a href=(link(previous)) { "previous" }
            }
            span.current {
                " Page " (window.number) " of " (window.total_pages) " "
            }
            @if let Some(next) = window.next_number() {
                a href=(link(next)) { "next" }
                " "
                a href=(link(window.total_pages)) { "last »" }
            }
        }
    }
}

fn post_card(post: &Post) -> Markup {
    html! {
        article.post-card {
            h2 { a href=(post.url()) { (post.title) } }
            p.meta {
                "by " a href=(user_url(&post.author_username)) { (post.author_username) }
                " on " (post.created_at.format(DATE_FORMAT).to_string())
                @if let Some(category) = post.category.as_deref().filter(|c| !c.is_empty()) {
                    " in " a href=(category_url(category)) { (category) }
                }
                " · " (post.likes) " likes"
            }
            p.excerpt { (excerpt_words(&post.content, 30)) }
        }
    }
}

// Home-page teaser: first `words` words of the content.
fn excerpt_words(content: &str, words: usize) -> String {
    let mut parts = content.split_whitespace();
    let head: Vec<&str> = parts.by_ref().take(words).collect();
    if parts.next().is_some() {
        format!("{} …", head.join(" "))
    } else {
        head.join(" ")
    }
}

fn post_list(posts: &Page<Post>, extra_query: &str) -> Markup {
    html! {
        @if posts.items.is_empty() {
            p.empty { "No posts yet." }
        }
        @for post in &posts.items {
            (post_card(post))
        }
        (pagination(&posts.window, extra_query))
    }
}

pub(crate) fn home(
    ctx: &PageContext,
    posts: &Page<Post>,
    search_query: &str,
    categories: &[String],
) -> Markup {
    let extra_query = if search_query.is_empty() {
        String::new()
    } else {
        format!("&q={}", urlencoding::encode(search_query))
    };
    let body = html! {
        form.search method="get" action="/" {
            input type="search" name="q" value=(search_query) placeholder="Search posts";
            button type="submit" { "Search" }
        }
        @if !search_query.is_empty() {
            p.search-summary {
                (posts.window.total_items) " result(s) for “" (search_query) "”"
            }
        }
        div.layout {
            section.posts { (post_list(posts, &extra_query)) }
            aside.sidebar {
                h3 { "Categories" }
                ul.categories {
                    @for category in categories {
                        li { a href=(category_url(category)) { (category) } }
                    }
                }
            }
        }
    };
    page("Home", ctx, body)
}

pub(crate) fn user_posts(ctx: &PageContext, username: &str, posts: &Page<Post>) -> Markup {
    let body = html! {
        h1 { "Posts by " (username) " (" (posts.window.total_items) ")" }
        (post_list(posts, ""))
    };
    page(&format!("Posts by {username}"), ctx, body)
}

pub(crate) fn category_posts(ctx: &PageContext, category: &str, posts: &Page<Post>) -> Markup {
    let body = html! {
        h1 { "Category: " (category) " (" (posts.window.total_items) ")" }
        (post_list(posts, ""))
    };
    page(&format!("Category {category}"), ctx, body)
}

pub(crate) fn detail(ctx: &PageContext, post: &Post) -> Markup {
    let is_author = ctx
        .user
        .as_ref()
        .is_some_and(|user| post.is_authored_by(user.user_id));
    let tags: Vec<&str> = post.tag_list().collect();
    let body = html! {
        article.post {
            h1 { (post.title) }
            p.meta {
                "by " a href=(user_url(&post.author_username)) { (post.author_username) }
                " on " (post.created_at.format(DATE_FORMAT).to_string())
                @if let Some(category) = post.category.as_deref().filter(|c| !c.is_empty()) {
                    " in " a href=(category_url(category)) { (category) }
                }
            }
            @if !tags.is_empty() {
                ul.tags {
                    @for tag in &tags { li { (tag) } }
                }
            }
            p.likes { (post.likes) " likes" }
            div.content {
                @for paragraph in post.content.split("\n\n") {
                    p { (paragraph) }
                }
            }
            @if is_author {
                div.actions {
                    a href={ "/post/" (post.id) "/update/" } { "Edit" }
                    " "
                    a href={ "/post/" (post.id) "/delete/" } { "Delete" }
                }
            }
        }
    };
    page(&post.title, ctx, body)
}

fn field_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @for message in errors.for_field(field) {
            p.field-error { (message) }
        }
    }
}

pub(crate) fn form(
    ctx: &PageContext,
    heading: &str,
    action: &str,
    values: &PostForm,
    errors: &FieldErrors,
) -> Markup {
    let body = html! {
        h1 { (heading) }
        @if !errors.is_empty() {
            p.form-errors { "Please correct the errors below." }
        }
        form.post-form method="post" action=(action) {
            label for="title" { "Title" }
            input id="title" type="text" name="title" value=(values.title) maxlength="200";
            (field_errors(errors, "title"))

            label for="content" { "Content" }
            textarea id="content" name="content" rows="10" { (values.content) }
            (field_errors(errors, "content"))

            label for="category" { "Category" }
            input id="category" type="text" name="category" value=(values.category) maxlength="50";
            (field_errors(errors, "category"))

            label for="tags" { "Tags (comma separated)" }
            input id="tags" type="text" name="tags" value=(values.tags) maxlength="200";
            (field_errors(errors, "tags"))

            button type="submit" { "Save" }
        }
    };
    page(heading, ctx, body)
}

pub(crate) fn confirm_delete(ctx: &PageContext, post: &Post) -> Markup {
    let body = html! {
        h1 { "Delete post" }
        p { "Are you sure you want to delete “" (post.title) "”?" }
        form method="post" action={ "/post/" (post.id) "/delete/" } {
            button.danger type="submit" { "Yes, delete" }
            " "
            a href=(post.url()) { "Cancel" }
        }
    };
    page("Delete post", ctx, body)
}
