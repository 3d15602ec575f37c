use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::data::post_repository::{NewPost, PostRepository, Slice};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::filter::{PostFilter, newest_first};
use crate::domain::post::{Post, PostDraft};
use crate::domain::user::User;

/// Process-local storage for users and posts.
///
/// Clones share the same data. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, UserCredentials>,
    posts: BTreeMap<i64, StoredPost>,
    next_user_id: i64,
    next_post_id: i64,
}

#[derive(Debug, Clone)]
struct StoredPost {
    draft: PostDraft,
    author_id: i64,
    likes: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a post with an explicit timestamp.
    #[cfg(test)]
    pub(crate) async fn insert_post_at(
        &self,
        input: NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        let mut tables = self.inner.write().await;
        tables.insert_post(input, created_at)
    }
}

impl Tables {
    fn insert_post(&mut self, input: NewPost, created_at: DateTime<Utc>) -> Result<Post, DomainError> {
        if !self.users.contains_key(&input.author_id) {
            return Err(DomainError::NotFound("author".to_string()));
        }
        self.next_post_id += 1;
        let id = self.next_post_id;
        self.posts.insert(
            id,
            StoredPost {
                draft: input.draft,
                author_id: input.author_id,
                likes: 0,
                created_at,
                updated_at: created_at,
            },
        );
        self.materialize(id)
            .ok_or_else(|| DomainError::Unexpected(format!("post {id} vanished after insert")))
    }

    fn materialize(&self, id: i64) -> Option<Post> {
        let stored = self.posts.get(&id)?;
        let author = self.users.get(&stored.author_id)?;
        Some(Post {
            id,
            title: stored.draft.title.clone(),
            content: stored.draft.content.clone(),
            author_id: stored.author_id,
            author_username: author.user.username.clone(),
            category: stored.draft.category.clone(),
            tags: stored.draft.tags.clone(),
            likes: stored.likes,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    fn matching(&self, filter: &PostFilter) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .keys()
            .filter_map(|id| self.materialize(*id))
            .filter(|post| filter.matches(post))
            .collect();
        posts.sort_by(newest_first);
        posts
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tables = self.inner.write().await;
        tables.insert_post(input, Utc::now())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.inner.read().await.materialize(id))
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostDraft,
    ) -> Result<Option<Post>, DomainError> {
        let mut tables = self.inner.write().await;
        match tables.posts.get_mut(&post_id) {
            Some(stored) if stored.author_id == owner_id => {
                stored.draft = patch;
                stored.updated_at = Utc::now().max(stored.created_at);
            }
            _ => return Ok(None),
        }
        Ok(tables.materialize(post_id))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }

    async fn list_posts(&self, filter: &PostFilter, slice: Slice) -> Result<Vec<Post>, DomainError> {
        let offset = usize::try_from(slice.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(slice.limit).unwrap_or(usize::MAX);
        let posts = self.inner.read().await.matching(filter);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        let count = self.inner.read().await.matching(filter).len();
        u64::try_from(count).map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
        let tables = self.inner.read().await;
        let categories: BTreeSet<String> = tables
            .posts
            .values()
            .filter_map(|stored| stored.draft.category.clone())
            .filter(|category| !category.is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut tables = self.inner.write().await;
        for existing in tables.users.values() {
            if existing.user.username == input.username {
                return Err(DomainError::AlreadyExists("username".to_string()));
            }
            if existing.user.email == input.email {
                return Err(DomainError::AlreadyExists("email".to_string()));
            }
        }

        tables.next_user_id += 1;
        let user = User::new(tables.next_user_id, input.username, input.email, Utc::now())
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        tables.users.insert(
            user.id,
            UserCredentials {
                user: user.clone(),
                password_hash: input.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|creds| creds.user.username == username)
            .cloned())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::MemoryStore;
    use crate::data::post_repository::{NewPost, PostRepository, Slice};
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::filter::PostFilter;
    use crate::domain::post::PostDraft;
    use crate::domain::post::tests::at;
    use crate::domain::user::User;

    pub(crate) async fn seed_user(store: &MemoryStore, username: &str) -> User {
        store
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "not-a-real-hash".to_string(),
            })
            .await
            .expect("seed user must be created")
    }

    pub(crate) fn draft(title: &str, category: Option<&str>, tags: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: format!("body of {title}"),
            category: category.map(str::to_string),
            tags: tags.to_string(),
        }
    }

    /// Inserts `count` posts authored by `author_id`, one second apart.
    pub(crate) async fn seed_posts(store: &MemoryStore, author_id: i64, count: i64) {
        for n in 1..=count {
            store
                .insert_post_at(
                    NewPost {
                        draft: draft(&format!("post {n}"), None, ""),
                        author_id,
                    },
                    at(n),
                )
                .await
                .expect("seed post must be created");
        }
    }

    #[tokio::test]
    async fn list_posts_orders_newest_first_and_slices() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        seed_posts(&store, alice.id, 7).await;

        let page = store
            .list_posts(&PostFilter::all(), Slice { offset: 5, limit: 5 })
            .await
            .expect("list must succeed");

        let titles: Vec<&str> = page.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, vec!["post 2", "post 1"]);
        assert_eq!(page[0].author_username, "alice");
    }

    #[tokio::test]
    async fn count_and_categories_respect_filters() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        for (author, title, category) in [
            (alice.id, "one", Some("Tech")),
            (bob.id, "two", Some("Notes")),
            (bob.id, "three", Some("")),
            (alice.id, "four", None),
            (bob.id, "five", Some("Tech")),
        ] {
            store
                .create_post(NewPost {
                    draft: draft(title, category, ""),
                    author_id: author,
                })
                .await
                .expect("create must succeed");
        }

        let by_bob = PostFilter::all().author(Some("bob"));
        assert_eq!(store.count_posts(&by_bob).await.expect("count"), 3);

        let tech = PostFilter::all().category(Some("Tech"));
        assert_eq!(store.count_posts(&tech).await.expect("count"), 2);

        let categories = store.list_categories().await.expect("categories");
        assert_eq!(categories, vec!["Notes".to_string(), "Tech".to_string()]);
    }

    #[tokio::test]
    async fn update_post_owned_ignores_other_users() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        let post = store
            .create_post(NewPost {
                draft: draft("original", None, ""),
                author_id: alice.id,
            })
            .await
            .expect("create must succeed");

        let denied = store
            .update_post_owned(post.id, bob.id, draft("hijacked", None, ""))
            .await
            .expect("update must not error");
        assert!(denied.is_none());

        let updated = store
            .update_post_owned(post.id, alice.id, draft("edited", Some("Tech"), "a,b"))
            .await
            .expect("update must not error")
            .expect("owner update must apply");
        assert_eq!(updated.title, "edited");
        assert_eq!(updated.author_id, alice.id);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn create_post_requires_existing_author() {
        let store = MemoryStore::new();
        let err = store
            .create_post(NewPost {
                draft: draft("orphan", None, ""),
                author_id: 42,
            })
            .await
            .expect_err("unknown author must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        seed_user(&store, "alice").await;

        let err = store
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists(ref what) if what == "username"));
    }
}
