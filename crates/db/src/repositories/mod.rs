//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument.

pub mod user_repo;
pub mod watched_item_repo;

pub use user_repo::UserRepo;
pub use watched_item_repo::WatchedItemRepo;
