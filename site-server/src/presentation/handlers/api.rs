use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::filter::PostFilter;
use crate::domain::pagination::{Page, parse_page_number, parse_page_size};
use crate::domain::post::Post;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

const EXCERPT_CHARS: usize = 100;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Every parameter is optional; malformed numbers fall back to defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct ApiListQuery {
    /// 1-based page; invalid values mean 1, values past the end the last page.
    pub(crate) page: Option<String>,
    /// Page size, default 5.
    pub(crate) limit: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) author: Option<String>,
    /// Case-insensitive match on title, content, author and tags.
    pub(crate) search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostSummaryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    /// First 100 characters, with `...` appended when cut.
    pub(crate) content: String,
    #[schema(example = "2025-01-31 18:04:00")]
    pub(crate) date_posted: String,
    pub(crate) author: String,
    pub(crate) category: Option<String>,
    pub(crate) likes: i64,
    #[schema(example = "/post/1/")]
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostPageDto {
    pub(crate) posts: Vec<PostSummaryDto>,
    pub(crate) has_next: bool,
    pub(crate) has_previous: bool,
    pub(crate) page: u32,
    pub(crate) total_pages: u32,
    pub(crate) total_items: u64,
}

impl From<Post> for PostSummaryDto {
    fn from(post: Post) -> Self {
        Self {
            url: post.url(),
            id: post.id,
            title: post.title,
            content: excerpt(&post.content),
            date_posted: post.created_at.format(DATE_FORMAT).to_string(),
            author: post.author_username,
            category: post.category,
            likes: post.likes,
        }
    }
}

impl From<Page<Post>> for PostPageDto {
    fn from(page: Page<Post>) -> Self {
        let window = page.window;
        Self {
            posts: page.items.into_iter().map(PostSummaryDto::from).collect(),
            has_next: window.has_next(),
            has_previous: window.has_previous(),
            page: window.number,
            total_pages: window.total_pages,
            total_items: window.total_items,
        }
    }
}

fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/posts/",
    tag = "posts",
    params(ApiListQuery),
    responses(
        (status = 200, description = "One page of posts, newest first", body = PostPageDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ApiListQuery>,
) -> AppResult<Json<PostPageDto>> {
    let filter = PostFilter::all()
        .search(query.search.as_deref())
        .category(query.category.as_deref())
        .author(query.author.as_deref());
    let page = state
        .blog_service
        .list_posts(
            &filter,
            parse_page_number(query.page.as_deref()),
            parse_page_size(query.limit.as_deref()),
        )
        .await?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use super::{PostSummaryDto, excerpt};
    use crate::domain::post::tests::sample_post;

    #[test]
    fn excerpt_keeps_short_content_verbatim() {
        let exact = "x".repeat(100);
        assert_eq!(excerpt(&exact), exact);
        assert_eq!(excerpt(""), "");
    }

    #[test]
    fn excerpt_cuts_on_characters() {
        let long = "é".repeat(101);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("é..."));
    }

    #[test]
    fn summary_uses_username_and_detail_url() {
        let mut post = sample_post(4, "Hello", 2, "alice");
        post.category = Some("Tech".to_string());

        let dto = PostSummaryDto::from(post);
        assert_eq!(dto.author, "alice");
        assert_eq!(dto.url, "/post/4/");
        assert_eq!(dto.category.as_deref(), Some("Tech"));
        assert_eq!(dto.date_posted.len(), "YYYY-MM-DD HH:MM:SS".len());
    }
}
