//! 兜底装饰器
//!
//! 每个调用先交给主服务；主服务不可用（`AdminError::is_retryable`）时记录告警和指标，
//! 再由兜底服务处理同一调用。数据校验等其它错误原样返回，兜底服务的错误同样直接返回。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use admin_shared::error::{AdminError, Result};
use admin_shared::observability::metrics::record_fallback;

use super::RecordService;
use crate::models::Record;

pub struct FallbackService<T> {
    primary: Arc<dyn RecordService<T>>,
    fallback: Arc<dyn RecordService<T>>,
}

impl<T: Record> FallbackService<T> {
    pub fn new(primary: Arc<dyn RecordService<T>>, fallback: Arc<dyn RecordService<T>>) -> Self {
        Self { primary, fallback }
    }

    fn degrade(&self, operation: &'static str, error: &AdminError) {
        warn!(
            kind = T::KIND,
            operation,
            error = %error,
            "主存储操作失败，切换到内存兜底存储"
        );
        record_fallback(T::KIND, operation);
    }
}

#[async_trait]
impl<T: Record> RecordService<T> for FallbackService<T> {
    async fn list(&self) -> Result<Vec<T>> {
        match self.primary.list().await {
            Ok(records) => Ok(records),
            Err(e) if e.is_retryable() => {
                self.degrade("list", &e);
                self.fallback.list().await
            }
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        match self.primary.get_by_id(id).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_retryable() => {
                self.degrade("get", &e);
                self.fallback.get_by_id(id).await
            }
            Err(e) => Err(e),
        }
    }

    async fn create(&self, patch: T::Patch) -> Result<T> {
        match self.primary.create(patch.clone()).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_retryable() => {
                self.degrade("create", &e);
                self.fallback.create(patch).await
            }
            Err(e) => Err(e),
        }
    }

    async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>> {
        match self.primary.update(id, patch.clone()).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_retryable() => {
                self.degrade("update", &e);
                self.fallback.update(id, patch).await
            }
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self.primary.delete(id).await {
            Ok(deleted) => Ok(deleted),
            Err(e) if e.is_retryable() => {
                self.degrade("delete", &e);
                self.fallback.delete(id).await
            }
            Err(e) => Err(e),
        }
    }
}
