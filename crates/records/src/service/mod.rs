//! 记录服务层
//!
//! HTTP 层只依赖 `RecordService` 抽象。具体实现：
//! - `MemoryRecordService`：直接读写兜底存储
//! - `PgRecordService`：PostgreSQL 主存储
//! - `FallbackService`：主存储失败时切换到兜底实现的装饰器

pub mod fallback;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use admin_shared::error::Result;

use crate::models::{Product, Record, User};
use crate::store::FallbackStore;

pub use fallback::FallbackService;
pub use memory::MemoryRecordService;
pub use postgres::PgRecordService;

/// 记录服务接口
///
/// 未找到以 `None` / `false` 表达，错误只表示后端故障或数据不合法
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordService<T: Record>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>>;
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;
    async fn create(&self, patch: T::Patch) -> Result<T>;
    async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// HTTP 层使用的服务集合
#[derive(Clone)]
pub struct RecordServices {
    pub users: Arc<dyn RecordService<User>>,
    pub products: Arc<dyn RecordService<Product>>,
}

impl RecordServices {
    /// 纯内存模式：所有请求由兜底存储处理
    pub fn memory(store: Arc<FallbackStore>) -> Self {
        Self {
            users: Arc::new(MemoryRecordService::<User>::new(Arc::clone(&store))),
            products: Arc::new(MemoryRecordService::<Product>::new(store)),
        }
    }

    /// 数据库模式：PostgreSQL 为主存储，失败时切换到兜底存储
    pub fn with_database(pool: PgPool, store: Arc<FallbackStore>) -> Self {
        Self {
            users: Arc::new(FallbackService::new(
                Arc::new(PgRecordService::<User>::new(pool.clone())),
                Arc::new(MemoryRecordService::<User>::new(Arc::clone(&store))),
            )),
            products: Arc::new(FallbackService::new(
                Arc::new(PgRecordService::<Product>::new(pool)),
                Arc::new(MemoryRecordService::<Product>::new(store)),
            )),
        }
    }
}
