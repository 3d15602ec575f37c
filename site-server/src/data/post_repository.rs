use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::filter::PostFilter;
use crate::domain::post::{Post, PostDraft};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) draft: PostDraft,
    pub(crate) author_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slice {
    pub(crate) offset: u64,
    pub(crate) limit: u32,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Applies the draft only when `owner_id` authored the post.
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostDraft,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    /// Matching posts, newest first.
    async fn list_posts(&self, filter: &PostFilter, slice: Slice) -> Result<Vec<Post>, DomainError>;
    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError>;
    /// Distinct non-blank categories, in no particular order.
    async fn list_categories(&self) -> Result<Vec<String>, DomainError>;
}

#[async_trait]
impl<R: PostRepository + ?Sized> PostRepository for Arc<R> {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        (**self).create_post(input).await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        (**self).get_post(id).await
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostDraft,
    ) -> Result<Option<Post>, DomainError> {
        (**self).update_post_owned(post_id, owner_id, patch).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_post(id).await
    }

    async fn list_posts(&self, filter: &PostFilter, slice: Slice) -> Result<Vec<Post>, DomainError> {
        (**self).list_posts(filter, slice).await
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        (**self).count_posts(filter).await
    }

    async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
        (**self).list_categories().await
    }
}
