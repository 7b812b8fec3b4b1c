/// Word Ocean - vocabulary association explorer
///
/// Core library providing dictionary loading, root/semantic/spelling word
/// association, an offline-first asset cache, and a TTL key-value store for
/// memoized lookups.

pub mod config;
pub mod core;
pub mod database;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
