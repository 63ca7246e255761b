//! Key cache domain - known-valid credential membership

mod entry;
mod repository;

pub use entry::KeyCacheEntry;
pub use repository::KeyCache;
