use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::domain::post::{Post, PostDraft};

/// Field name to messages, rendered next to the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub(crate) fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub(crate) fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                out.push(&field, message);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct PostForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters."))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Content is required."))]
    pub(crate) content: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Category must be at most 50 characters."))]
    pub(crate) category: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Tags must be at most 200 characters."))]
    pub(crate) tags: String,
}

impl PostForm {
    /// Runs the field checks; on failure returns the messages to redisplay.
    pub(crate) fn check(&self) -> Result<PostDraft, FieldErrors> {
        self.validate().map_err(|errors| FieldErrors::from(&errors))?;
        Ok(PostDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            category: Some(self.category.clone()),
            tags: self.tags.clone(),
        })
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        let draft = PostDraft::from(post);
        Self {
            title: draft.title,
            content: draft.content,
            category: draft.category.unwrap_or_default(),
            tags: draft.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "Enter your username."))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Enter your password."))]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) next: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters."))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters."))]
    pub(crate) password: String,
}

/// Keeps post-login redirects on this site.
pub(crate) fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
