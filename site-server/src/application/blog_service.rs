use tracing::{debug, info, warn};

use crate::data::post_repository::{NewPost, PostRepository, Slice};
use crate::domain::error::DomainError;
use crate::domain::filter::PostFilter;
use crate::domain::pagination::{Page, Paginator};
use crate::domain::post::{Post, PostDraft};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let draft = draft.validate()?;
        let post = self.repo.create_post(NewPost { draft, author_id }).await?;
        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Loads a post the actor is allowed to change.
    pub(crate) async fn editable_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<Post, DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.is_authored_by(actor_user_id) {
            warn!(post_id, actor_user_id, "rejected change by non-author");
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        self.editable_post(actor_user_id, post_id).await?;
        let draft = draft.validate()?;

        let post = self
            .repo
            .update_post_owned(post_id, actor_user_id, draft)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        info!(post_id, "post updated");
        Ok(post)
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        self.editable_post(actor_user_id, post_id).await?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::post_not_found(post_id));
        }
        info!(post_id, "post deleted");
        Ok(())
    }

    /// Filters, counts and slices one page of posts, newest first.
    pub(crate) async fn list_posts(
        &self,
        filter: &PostFilter,
        requested_page: u32,
        per_page: u32,
    ) -> Result<Page<Post>, DomainError> {
        let total = self.repo.count_posts(filter).await?;
        let window = Paginator::new(total, per_page).page(requested_page);
        let slice = Slice {
            offset: window.offset(),
            limit: window.limit(),
        };
        let items = if total == 0 {
            Vec::new()
        } else {
            self.repo.list_posts(filter, slice).await?
        };
        debug!(
            filtered = !filter.is_empty(),
            page = window.number,
            total,
            "posts listed"
        );

        Ok(Page { items, window })
    }

    pub(crate) async fn categories(&self) -> Result<Vec<String>, DomainError> {
        self.repo.list_categories().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::BlogService;
    use crate::data::post_repository::{NewPost, PostRepository, Slice};
    use crate::data::repositories::memory::MemoryStore;
    use crate::data::repositories::memory::store::tests::{draft, seed_posts, seed_user};
    use crate::domain::error::DomainError;
    use crate::domain::filter::PostFilter;
    use crate::domain::post::tests::sample_post;
    use crate::domain::post::{Post, PostDraft};

    #[derive(Clone, Default)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        post_for_get: Arc<Mutex<Option<Post>>>,
        update_calls: Arc<Mutex<Vec<(i64, i64, PostDraft)>>>,
        delete_calls: Arc<Mutex<Vec<i64>>>,
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            let mut post = sample_post(1, &input.draft.title, input.author_id, "alice");
            post.content = input.draft.content;
            Ok(post)
        }

        async fn get_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn update_post_owned(
            &self,
            post_id: i64,
            owner_id: i64,
            patch: PostDraft,
        ) -> Result<Option<Post>, DomainError> {
            self.update_calls
                .lock()
                .expect("update_calls mutex poisoned")
                .push((post_id, owner_id, patch.clone()));
            let mut post = sample_post(post_id, &patch.title, owner_id, "alice");
            post.category = patch.category;
            Ok(Some(post))
        }

        async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
            self.delete_calls
                .lock()
                .expect("delete_calls mutex poisoned")
                .push(id);
            Ok(true)
        }

        async fn list_posts(
            &self,
            _filter: &PostFilter,
            _slice: Slice,
        ) -> Result<Vec<Post>, DomainError> {
            Ok(Vec::new())
        }

        async fn count_posts(&self, _filter: &PostFilter) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
            Ok(Vec::new())
        }
    }

    impl FakePostRepo {
        fn with_post(post: Post) -> Self {
            let repo = Self::default();
            *repo
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned") = Some(post);
            repo
        }
    }

    #[tokio::test]
    async fn create_post_normalizes_draft_before_repo_call() {
        let repo = FakePostRepo::default();
        let service = BlogService::new(repo.clone());

        let created = service
            .create_post(10, draft("  title  ", Some("  "), " rust "))
            .await
            .expect("create_post must succeed");
        assert_eq!(created.title, "title");

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.draft.title, "title");
        assert_eq!(input.draft.category, None);
        assert_eq!(input.draft.tags, "rust");
        assert_eq!(input.author_id, 10);
    }

    #[tokio::test]
    async fn get_post_returns_not_found_when_missing() {
        let service = BlogService::new(FakePostRepo::default());

        let err = service.get_post(42).await.expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_by_non_author_is_forbidden_and_untouched() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", 99, "owner"));
        let service = BlogService::new(repo.clone());

        let err = service
            .update_post(10, 7, draft("new", None, ""))
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(
            repo.update_calls
                .lock()
                .expect("update_calls mutex poisoned")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn update_post_by_author_goes_through_owned_update() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", 10, "alice"));
        let service = BlogService::new(repo.clone());

        let updated = service
            .update_post(10, 7, draft("  new  ", Some("Tech"), ""))
            .await
            .expect("update must succeed");
        assert_eq!(updated.id, 7);
        assert_eq!(updated.title, "new");

        let calls = repo
            .update_calls
            .lock()
            .expect("update_calls mutex poisoned")
            .clone();
        assert_eq!(calls.len(), 1);
        assert_eq!((calls[0].0, calls[0].1), (7, 10));
        assert_eq!(calls[0].2.category.as_deref(), Some("Tech"));
    }

    #[tokio::test]
    async fn delete_post_by_non_author_is_forbidden() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", 99, "owner"));
        let service = BlogService::new(repo.clone());

        let err = service
            .delete_post(10, 7)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(
            repo.delete_calls
                .lock()
                .expect("delete_calls mutex poisoned")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn delete_post_of_missing_post_is_not_found() {
        let service = BlogService::new(FakePostRepo::default());

        let err = service
            .delete_post(10, 7)
            .await
            .expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_posts_clamps_page_past_the_end() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        seed_posts(&store, alice.id, 12).await;
        let service = BlogService::new(store);

        let page = service
            .list_posts(&PostFilter::all(), 99, 5)
            .await
            .expect("list must succeed");

        assert_eq!(page.window.number, 3);
        assert_eq!(page.window.total_pages, 3);
        assert_eq!(page.window.total_items, 12);
        assert!(!page.window.has_next());
        assert!(page.window.has_previous());
        let titles: Vec<&str> = page.items.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, vec!["post 2", "post 1"]);
    }

    #[tokio::test]
    async fn list_posts_pages_are_five_five_two() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        seed_posts(&store, alice.id, 12).await;
        let service = BlogService::new(store);

        let mut sizes = Vec::new();
        for number in 1..=3 {
            let page = service
                .list_posts(&PostFilter::all(), number, 5)
                .await
                .expect("list must succeed");
            sizes.push(page.items.len());
        }
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[tokio::test]
    async fn list_posts_on_empty_store_returns_single_empty_page() {
        let service = BlogService::new(MemoryStore::new());

        let page = service
            .list_posts(&PostFilter::all().search(Some("nothing")), 3, 5)
            .await
            .expect("list must succeed");

        assert!(page.items.is_empty());
        assert_eq!(page.window.number, 1);
        assert_eq!(page.window.total_pages, 1);
    }
}
