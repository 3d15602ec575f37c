//! Server-rendered HTML built with `maud`. Every interpolation is escaped.

pub(crate) mod accounts;
pub(crate) mod animations;
pub(crate) mod layout;
pub(crate) mod posts;
pub(crate) mod spa;

pub(crate) use layout::PageContext;
