// Service exports
pub mod cache;
pub mod profile_store;

pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
pub use profile_store::{ProfileStoreClient, ProfileStoreError};
