use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::page_context;
use crate::domain::error::DomainError;
use crate::domain::filter::PostFilter;
use crate::domain::pagination::{HTML_PAGE_SIZE, parse_page_number};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult, parse_path_id};
use crate::presentation::flash::{self, Flash};
use crate::presentation::forms::{FieldErrors, PostForm};
use crate::presentation::middleware::auth::{AuthenticatedUser, CurrentUser};
use crate::presentation::views::{self, PageContext};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    q: Option<String>,
    page: Option<String>,
}

pub(crate) async fn home(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> AppResult<(CookieJar, Html<String>)> {
    let filter = PostFilter::all().search(query.q.as_deref());
    let search = filter.search.as_deref().unwrap_or_default();
    let posts = state
        .blog_service
        .list_posts(&filter, parse_page_number(query.page.as_deref()), HTML_PAGE_SIZE)
        .await?;
    let categories = state.blog_service.categories().await?;

    let (jar, ctx) = page_context(user, jar);
    let markup = views::posts::home(&ctx, &posts, search, &categories);
    Ok((jar, Html(markup.into_string())))
}

pub(crate) async fn detail(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> AppResult<(CookieJar, Html<String>)> {
    let post = state.blog_service.get_post(parse_path_id(&raw_id)?).await?;

    let (jar, ctx) = page_context(user, jar);
    Ok((jar, Html(views::posts::detail(&ctx, &post).into_string())))
}

pub(crate) async fn user_posts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(username): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<(CookieJar, Html<String>)> {
    let filter = PostFilter::all().author(Some(username.as_str()));
    let posts = state
        .blog_service
        .list_posts(&filter, parse_page_number(query.page.as_deref()), HTML_PAGE_SIZE)
        .await?;

    let (jar, ctx) = page_context(user, jar);
    let markup = views::posts::user_posts(&ctx, &username, &posts);
    Ok((jar, Html(markup.into_string())))
}

pub(crate) async fn category_posts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(category): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<(CookieJar, Html<String>)> {
    let filter = PostFilter::all().category(Some(category.as_str()));
    let posts = state
        .blog_service
        .list_posts(&filter, parse_page_number(query.page.as_deref()), HTML_PAGE_SIZE)
        .await?;

    let (jar, ctx) = page_context(user, jar);
    let markup = views::posts::category_posts(&ctx, &category, &posts);
    Ok((jar, Html(markup.into_string())))
}

pub(crate) async fn new_form(user: AuthenticatedUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, ctx) = page_context(Some(user), jar);
    let markup = views::posts::form(
        &ctx,
        "New post",
        "/post/new/",
        &PostForm::default(),
        &FieldErrors::default(),
    );
    (jar, Html(markup.into_string()))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let draft = match form.check() {
        Ok(draft) => draft,
        Err(errors) => return Ok(rerender(jar, user, "New post", "/post/new/", &form, &errors)),
    };

    match state.blog_service.create_post(user.user_id, draft).await {
        Ok(post) => Ok(redirect_with(jar, Flash::PostCreated, &post.url())),
        Err(err) => {
            let errors = draft_rejected(err)?;
            Ok(rerender(jar, user, "New post", "/post/new/", &form, &errors))
        }
    }
}

pub(crate) async fn edit_form(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_path_id(&raw_id)?;
    let post = match state.blog_service.editable_post(user.user_id, id).await {
        Ok(post) => post,
        Err(err) => return change_rejected(jar, id, Flash::EditForbidden, err),
    };

    let (jar, ctx) = page_context(Some(user), jar);
    let markup = views::posts::form(
        &ctx,
        "Edit post",
        &update_url(id),
        &PostForm::from(&post),
        &FieldErrors::default(),
    );
    Ok((jar, Html(markup.into_string())).into_response())
}

pub(crate) async fn update(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    jar: CookieJar,
    Path(raw_id): Path<String>,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let id = parse_path_id(&raw_id)?;
    if let Err(err) = state.blog_service.editable_post(user.user_id, id).await {
        return change_rejected(jar, id, Flash::EditForbidden, err);
    }
    let action = update_url(id);
    let draft = match form.check() {
        Ok(draft) => draft,
        Err(errors) => return Ok(rerender(jar, user, "Edit post", &action, &form, &errors)),
    };

    match state.blog_service.update_post(user.user_id, id, draft).await {
        Ok(post) => Ok(redirect_with(jar, Flash::PostUpdated, &post.url())),
        Err(DomainError::Validation { field, message }) => {
            let errors = FieldErrors::single(field, message);
            Ok(rerender(jar, user, "Edit post", &action, &form, &errors))
        }
        Err(err) => change_rejected(jar, id, Flash::EditForbidden, err),
    }
}

pub(crate) async fn delete_form(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_path_id(&raw_id)?;
    let post = match state.blog_service.editable_post(user.user_id, id).await {
        Ok(post) => post,
        Err(err) => return change_rejected(jar, id, Flash::DeleteForbidden, err),
    };

    let (jar, ctx) = page_context(Some(user), jar);
    Ok((jar, Html(views::posts::confirm_delete(&ctx, &post).into_string())).into_response())
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_path_id(&raw_id)?;
    match state.blog_service.delete_post(user.user_id, id).await {
        Ok(()) => Ok(redirect_with(jar, Flash::PostDeleted, "/")),
        Err(err) => change_rejected(jar, id, Flash::DeleteForbidden, err),
    }
}

fn update_url(id: i64) -> String {
    format!("/post/{id}/update/")
}

fn redirect_with(jar: CookieJar, notice: Flash, to: &str) -> Response {
    (flash::set(jar, notice), Redirect::to(to)).into_response()
}

/// Non-authors are bounced to the detail page; other failures propagate.
fn change_rejected(
    jar: CookieJar,
    post_id: i64,
    denied: Flash,
    err: DomainError,
) -> AppResult<Response> {
    match err {
        DomainError::Forbidden => Ok(redirect_with(jar, denied, &format!("/post/{post_id}/"))),
        other => Err(AppError::from(other)),
    }
}

/// Domain-level validation failures become form messages.
fn draft_rejected(err: DomainError) -> AppResult<FieldErrors> {
    match err {
        DomainError::Validation { field, message } => Ok(FieldErrors::single(field, message)),
        other => Err(AppError::from(other)),
    }
}

fn rerender(
    jar: CookieJar,
    user: AuthenticatedUser,
    heading: &str,
    action: &str,
    form: &PostForm,
    errors: &FieldErrors,
) -> Response {
    let ctx = PageContext::new(Some(user), None);
    let markup = views::posts::form(&ctx, heading, action, form, errors);
    (jar, Html(markup.into_string())).into_response()
}
