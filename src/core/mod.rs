pub mod group_manager;
pub mod services;

pub use group_manager::{GroupManager, StorageBackend};
