//! 存储模块
//!
//! - `memory_store`: 有序内存集合
//! - `fallback_store`: 首次访问时预填充模拟数据的兜底存储

pub mod fallback_store;
pub mod memory_store;

pub use fallback_store::{FallbackCollection, FallbackRecord, FallbackStore};
pub use memory_store::MemoryStore;
