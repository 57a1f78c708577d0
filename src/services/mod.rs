// Service exports
pub mod cache;
pub mod firestore;

pub use cache::{CacheError, CacheKey, CacheManager, CachedJobStore};
pub use firestore::{FirestoreClient, FirestoreCollections, FirestoreError};
