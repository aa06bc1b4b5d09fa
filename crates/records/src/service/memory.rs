//! 内存记录服务

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use admin_shared::error::Result;
use admin_shared::observability::metrics::record_operation;

use super::RecordService;
use crate::store::{FallbackRecord, FallbackStore};

const BACKEND: &str = "memory";

/// 基于兜底存储的记录服务，所有操作都不会失败
pub struct MemoryRecordService<T> {
    store: Arc<FallbackStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryRecordService<T> {
    pub fn new(store: Arc<FallbackStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: FallbackRecord> RecordService<T> for MemoryRecordService<T> {
    async fn list(&self) -> Result<Vec<T>> {
        record_operation(T::KIND, "list", BACKEND);
        Ok(T::collection(&self.store).list())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        record_operation(T::KIND, "get", BACKEND);
        Ok(T::collection(&self.store).get(id))
    }

    async fn create(&self, patch: T::Patch) -> Result<T> {
        record_operation(T::KIND, "create", BACKEND);
        Ok(T::collection(&self.store).create(patch))
    }

    async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>> {
        record_operation(T::KIND, "update", BACKEND);
        Ok(T::collection(&self.store).update(id, patch))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        record_operation(T::KIND, "delete", BACKEND);
        Ok(T::collection(&self.store).delete(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{DataGenerator, GeneratorConfig};
    use crate::models::{Product, User, UserPatch};

    fn store() -> Arc<FallbackStore> {
        let generator = DataGenerator::seeded(GeneratorConfig::default(), 42);
        Arc::new(FallbackStore::with_generator(Arc::new(generator), 3, 4))
    }

    #[tokio::test]
    async fn test_memory_service_crud() {
        let service = MemoryRecordService::<User>::new(store());
        assert_eq!(service.list().await.unwrap().len(), 3);

        let created = service
            .create(UserPatch {
                name: Some("Bob".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(service.get_by_id(&created.id).await.unwrap(), Some(created.clone()));

        let updated = service
            .update(
                &created.id,
                UserPatch {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "bob@example.com");

        assert!(service.delete(&created.id).await.unwrap());
        assert!(!service.delete(&created.id).await.unwrap());
        assert!(service.get_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_services_share_store() {
        let store = store();
        let users = MemoryRecordService::<User>::new(Arc::clone(&store));
        let products = MemoryRecordService::<Product>::new(Arc::clone(&store));

        assert_eq!(products.list().await.unwrap().len(), 4);
        users.create(UserPatch::default()).await.unwrap();
        assert_eq!(store.users().count(), 4);
    }
}
