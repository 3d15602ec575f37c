//! Post listing filters.
//!
//! A filter is a conjunction of optional criteria. Unset criteria are not
//! applied, so the default filter selects every post. Results are always
//! ordered newest first.

use super::post::Post;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostFilter {
    /// Case-insensitive substring over title, content, author username and tags.
    pub(crate) search: Option<String>,
    /// Exact, case-sensitive category.
    pub(crate) category: Option<String>,
    /// Exact, case-sensitive author username.
    pub(crate) author: Option<String>,
}

impl PostFilter {
    pub(crate) fn all() -> Self {
        Self::default()
    }

    /// Surrounding whitespace is ignored; blank text means no search.
    pub(crate) fn search(mut self, text: Option<&str>) -> Self {
        self.search = non_empty(text.map(str::trim));
        self
    }

    pub(crate) fn category(mut self, category: Option<&str>) -> Self {
        self.category = non_empty(category);
        self
    }

    pub(crate) fn author(mut self, username: Option<&str>) -> Self {
        self.author = non_empty(username);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.author.is_none()
    }

    pub(crate) fn matches(&self, post: &Post) -> bool {
        if let Some(category) = &self.category
            && post.category.as_deref() != Some(category.as_str())
        {
            return false;
        }
        if let Some(author) = &self.author
            && post.author_username != *author
        {
            return false;
        }
        match &self.search {
            Some(text) => {
                let needle = text.to_lowercase();
                [
                    post.title.as_str(),
                    post.content.as_str(),
                    post.author_username.as_str(),
                    post.tags.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    /// `ILIKE` pattern for the search text with LIKE wildcards escaped.
    pub(crate) fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|text| format!("%{}%", escape_like(text)))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_string)
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Newest first, ties broken by id so paging stays stable.
pub(crate) fn newest_first(a: &Post, b: &Post) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
