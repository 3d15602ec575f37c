use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::data::post_repository::{NewPost, PostRepository, Slice};
use crate::domain::error::DomainError;
use crate::domain::filter::PostFilter;
use crate::domain::post::{Post, PostDraft};

const SELECT_POSTS: &str = r#"
    SELECT
        p.id,
        p.title,
        p.content,
        p.author_id,
        u.username AS author_username,
        p.category,
        p.tags,
        p.likes,
        p.created_at,
        p.updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_POSTS);
        query.push(" WHERE p.id = ").push_bind(id);

        let row = query
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    author_username: String,
    category: Option<String>,
    tags: String,
    likes: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, author_id, category, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.draft.title)
        .bind(&input.draft.content)
        .bind(input.author_id)
        .bind(&input.draft.category)
        .bind(&input.draft.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Unexpected(format!("post {id} vanished after insert")))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.fetch_by_id(id).await
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostDraft,
    ) -> Result<Option<Post>, DomainError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET title = $3,
                content = $4,
                category = $5,
                tags = $6,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(&patch.category)
        .bind(&patch.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        match updated {
            Some(id) => self.fetch_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self, filter: &PostFilter, slice: Slice) -> Result<Vec<Post>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_POSTS);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(i64::from(slice.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(slice.offset).unwrap_or(i64::MAX));

        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM posts p JOIN users u ON u.id = p.author_id",
        );
        push_filter(&mut query, filter);

        let count: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        u64::try_from(count).map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT category
            FROM posts
            WHERE category IS NOT NULL AND category <> ''
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    query.push(" WHERE TRUE");
    if let Some(category) = &filter.category {
        query.push(" AND p.category = ").push_bind(category.clone());
    }
    if let Some(author) = &filter.author {
        query.push(" AND u.username = ").push_bind(author.clone());
    }
    if let Some(pattern) = filter.search_pattern() {
        query.push(" AND (p.title ILIKE ").push_bind(pattern.clone());
        query.push(" OR p.content ILIKE ").push_bind(pattern.clone());
        query.push(" OR u.username ILIKE ").push_bind(pattern.clone());
        query.push(" OR p.tags ILIKE ").push_bind(pattern);
        query.push(")");
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post {
        id: row.id,
        title: row.title,
        content: row.content,
        author_id: row.author_id,
        author_username: row.author_username,
        category: row.category,
        tags: row.tags,
        likes: row.likes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
    .validate()
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use sqlx::{Postgres, QueryBuilder};

    use super::push_filter;
    use crate::domain::filter::PostFilter;

    const BASE: &str = "SELECT p.id FROM posts p JOIN users u ON u.id = p.author_id";

    fn filtered_sql(filter: &PostFilter) -> String {
        let mut query = QueryBuilder::<Postgres>::new(BASE);
        push_filter(&mut query, filter);
        query.sql().to_string()
    }

    #[test]
    fn empty_filter_adds_no_conditions() {
        assert_eq!(filtered_sql(&PostFilter::all()), format!("{BASE} WHERE TRUE"));
    }

    #[test]
    fn search_ors_the_four_fields() {
        let sql = filtered_sql(&PostFilter::all().search(Some("rust")));
        assert_eq!(
            sql,
            format!(
                "{BASE} WHERE TRUE AND (p.title ILIKE $1 OR p.content ILIKE $2 \
                 OR u.username ILIKE $3 OR p.tags ILIKE $4)"
            )
        );
    }

    #[test]
    fn all_criteria_are_anded_in_order() {
        let filter = PostFilter::all()
            .search(Some("50%"))
            .category(Some("Tech"))
            .author(Some("alice"));

        let sql = filtered_sql(&filter);
        assert_eq!(
            sql,
            format!(
                "{BASE} WHERE TRUE AND p.category = $1 AND u.username = $2 \
                 AND (p.title ILIKE $3 OR p.content ILIKE $4 \
                 OR u.username ILIKE $5 OR p.tags ILIKE $6)"
            )
        );
        assert_eq!(filter.search_pattern().as_deref(), Some(r"%50\%%"));
    }
}
