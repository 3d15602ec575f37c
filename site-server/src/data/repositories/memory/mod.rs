pub(crate) mod store;

pub(crate) use store::MemoryStore;
