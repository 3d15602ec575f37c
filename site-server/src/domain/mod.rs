pub(crate) mod error;
pub(crate) mod filter;
pub(crate) mod pagination;
pub(crate) mod post;
pub(crate) mod section;
pub(crate) mod user;
