use chrono::{DateTime, Utc};

use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 200;
pub(crate) const CATEGORY_MAX_CHARS: usize = 50;
pub(crate) const TAGS_MAX_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) category: Option<String>,
    pub(crate) tags: String,
    pub(crate) likes: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    /// Checks a post loaded from storage and normalizes its text fields.
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("id", self.id)?;
        validate_positive_i64("author_id", self.author_id)?;
        if self.likes < 0 {
            return Err(DomainError::Validation {
                field: "likes",
                message: "must be >= 0",
            });
        }
        if self.updated_at < self.created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            category: normalize_category(self.category.as_deref())?,
            tags: normalize_tags(&self.tags)?,
            ..self
        })
    }

    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    /// Canonical detail page path.
    pub(crate) fn url(&self) -> String {
        format!("/post/{}/", self.id)
    }

    /// Individual tags, trimmed, without blanks.
    pub(crate) fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// User-editable part of a post, shared by create and update.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostDraft {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: Option<String>,
    pub(crate) tags: String,
}

impl PostDraft {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            category: normalize_category(self.category.as_deref())?,
            tags: normalize_tags(&self.tags)?,
        })
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
        }
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..200 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

fn normalize_category(category: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(category) = category.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if category.chars().count() > CATEGORY_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "category",
            message: "must be at most 50 chars",
        });
    }
    Ok(Some(category.to_string()))
}

// Tags stay free text; only the outer whitespace is dropped.
fn normalize_tags(tags: &str) -> Result<String, DomainError> {
    let tags = tags.trim();
    if tags.chars().count() > TAGS_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "tags",
            message: "must be at most 200 chars",
        });
    }
    Ok(tags.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{DateTime, Duration, Utc};

    use super::{DomainError, Post, PostDraft};

    pub(crate) fn sample_post(id: i64, title: &str, author_id: i64, author: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: format!("content of {title}"),
            author_id,
            author_username: author.to_string(),
            category: None,
            tags: String::new(),
            likes: 0,
            created_at: at(id),
            updated_at: at(id),
        }
    }

    pub(crate) fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).expect("timestamp must be valid")
    }

    #[test]
    fn draft_validate_rejects_blank_title() {
        let draft = PostDraft {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            ..PostDraft::default()
        };

        let err = draft.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn draft_validate_rejects_empty_content() {
        let draft = PostDraft {
            title: "valid title".to_string(),
            content: " \n ".to_string(),
            ..PostDraft::default()
        };

        let err = draft.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn draft_validate_normalizes_fields() {
        let draft = PostDraft {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            category: Some("   ".to_string()),
            tags: "  rust, web ".to_string(),
        };

        let validated = draft.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert_eq!(validated.category, None);
        assert_eq!(validated.tags, "rust, web");
    }

    #[test]
    fn draft_validate_counts_characters_not_bytes() {
        let draft = PostDraft {
            title: "标".repeat(200),
            content: "content".to_string(),
            category: Some("技".repeat(50)),
            tags: String::new(),
        };

        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_validate_rejects_long_category() {
        let draft = PostDraft {
            title: "title".to_string(),
            content: "content".to_string(),
            category: Some("c".repeat(51)),
            tags: String::new(),
        };

        let err = draft.validate().expect_err("category must be rejected");
        assert_validation_field(err, "category");
    }

    #[test]
    fn post_validate_rejects_negative_likes() {
        let mut post = sample_post(1, "Title", 10, "alice");
        post.likes = -1;

        let err = post.validate().expect_err("likes must be >= 0");
        assert_validation_field(err, "likes");
    }

    #[test]
    fn post_validate_rejects_updated_before_created() {
        let mut post = sample_post(1, "Title", 10, "alice");
        post.updated_at = post.created_at - Duration::seconds(1);

        let err = post.validate().expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    #[test]
    fn tag_list_skips_blank_entries() {
        let mut post = sample_post(1, "Title", 10, "alice");
        post.tags = "Django, ,Python,  Web ".to_string();

        let tags: Vec<&str> = post.tag_list().collect();
        assert_eq!(tags, vec!["Django", "Python", "Web"]);
        assert_eq!(post.url(), "/post/1/");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
