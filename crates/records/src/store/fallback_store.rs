//! 兜底存储
//!
//! 主存储不可用时使用的内存数据集。每类记录在首次被访问时用生成器预填充
//! 一批模拟数据，之后的增删改查都只作用于内存，进程重启后数据丢失。

use std::sync::{Arc, OnceLock};

use chrono::Utc;
use tracing::{debug, warn};

use admin_shared::config::FallbackConfig;

use super::MemoryStore;
use crate::generators::{DataGenerator, GeneratorConfig, MockGenerator, Mockable};
use crate::models::{Product, User};

/// 单类记录的兜底集合
///
/// 状态：未初始化 → 已预填充。预填充只发生一次，之后不会重新生成
pub struct FallbackCollection<T> {
    items: MemoryStore<T>,
    seeded: OnceLock<()>,
    seed_size: usize,
    generator: Arc<dyn MockGenerator>,
}

impl<T: Mockable> FallbackCollection<T> {
    pub fn new(seed_size: usize, generator: Arc<dyn MockGenerator>) -> Self {
        Self {
            items: MemoryStore::new(),
            seeded: OnceLock::new(),
            seed_size,
            generator,
        }
    }

    /// 是否已完成预填充
    pub fn is_seeded(&self) -> bool {
        self.seeded.get().is_some()
    }

    /// 列出全部记录（插入顺序的副本）
    pub fn list(&self) -> Vec<T> {
        self.ensure_seeded();
        self.items.list()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.ensure_seeded();
        self.items.get(id)
    }

    /// 创建记录
    ///
    /// ID 由生成器给出且保证在集合内唯一，createdAt 取当前时间，
    /// 缺失字段由 `Mockable::assemble` 补齐
    pub fn create(&self, patch: T::Patch) -> T {
        self.ensure_seeded();

        let generator = self.generator.as_ref();
        let created_at = Utc::now();
        let record = self.items.push_unique(
            || generator.id(),
            |id| T::assemble(id, created_at, patch, generator),
        );

        debug!(kind = T::KIND, id = %record.id(), "兜底存储创建记录");
        record
    }

    /// 更新记录，不存在时返回 None 且不做任何修改
    pub fn update(&self, id: &str, patch: T::Patch) -> Option<T> {
        self.ensure_seeded();
        self.items.update_with(id, |record| record.apply(patch))
    }

    /// 删除记录，仅当集合确实变小时返回 true
    pub fn delete(&self, id: &str) -> bool {
        self.ensure_seeded();
        self.items.remove(id)
    }

    pub fn count(&self) -> usize {
        self.ensure_seeded();
        self.items.count()
    }

    fn ensure_seeded(&self) {
        self.seeded.get_or_init(|| {
            warn!(
                kind = T::KIND,
                count = self.seed_size,
                "主存储不可用，使用模拟数据"
            );

            let generator = self.generator.as_ref();
            for _ in 0..self.seed_size {
                self.items
                    .push_unique(|| generator.id(), |id| T::mock(id, generator));
            }
        });
    }
}

/// 进程内兜底存储
///
/// 显式构造并通过 `Arc` 在各 handler 间共享
pub struct FallbackStore {
    users: FallbackCollection<User>,
    products: FallbackCollection<Product>,
}

impl FallbackStore {
    /// 根据配置创建兜底存储，设置了 `rng_seed` 时生成的数据可复现
    pub fn new(config: &FallbackConfig) -> Self {
        let generator_config = GeneratorConfig {
            recent_days: config.recent_days,
            ..Default::default()
        };
        let generator = match config.rng_seed {
            Some(seed) => DataGenerator::seeded(generator_config, seed),
            None => DataGenerator::new(generator_config),
        };

        Self::with_generator(Arc::new(generator), config.seed_users, config.seed_products)
    }

    /// 使用指定生成器创建兜底存储
    pub fn with_generator(
        generator: Arc<dyn MockGenerator>,
        seed_users: usize,
        seed_products: usize,
    ) -> Self {
        Self {
            users: FallbackCollection::new(seed_users, Arc::clone(&generator)),
            products: FallbackCollection::new(seed_products, generator),
        }
    }

    pub fn users(&self) -> &FallbackCollection<User> {
        &self.users
    }

    pub fn products(&self) -> &FallbackCollection<Product> {
        &self.products
    }
}

impl Default for FallbackStore {
    fn default() -> Self {
        Self::new(&FallbackConfig::default())
    }
}

/// 按记录类型选取兜底集合
pub trait FallbackRecord: Mockable {
    fn collection(store: &FallbackStore) -> &FallbackCollection<Self>;
}

impl FallbackRecord for User {
    fn collection(store: &FallbackStore) -> &FallbackCollection<Self> {
        store.users()
    }
}

impl FallbackRecord for Product {
    fn collection(store: &FallbackStore) -> &FallbackCollection<Self> {
        store.products()
    }
}
