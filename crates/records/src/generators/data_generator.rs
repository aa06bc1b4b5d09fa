//! 数据生成器
//!
//! 基于 fake crate 生成结构合法的随机用户与商品。随机源通过 `MockGenerator`
//! trait 注入兜底存储，测试中可使用固定种子或替换为确定性实现。

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use parking_lot::Mutex;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::defaults;
use crate::models::{Category, Product, ProductPatch, Record, Role, User, UserPatch};

const PRODUCT_ADJECTIVES: [&str; 10] = [
    "Ergonomic",
    "Rustic",
    "Sleek",
    "Handcrafted",
    "Refined",
    "Practical",
    "Elegant",
    "Modern",
    "Compact",
    "Durable",
];

const PRODUCT_MATERIALS: [&str; 8] = [
    "Wooden", "Steel", "Cotton", "Leather", "Granite", "Bamboo", "Plastic", "Wool",
];

const PRODUCT_NOUNS: [&str; 10] = [
    "Chair", "Lamp", "Keyboard", "Jacket", "Table", "Backpack", "Speaker", "Mug", "Blanket",
    "Watch",
];

/// 随机数据源
///
/// 兜底存储只依赖此接口，便于在测试中替换为确定性实现
pub trait MockGenerator: Send + Sync {
    /// 新的记录 ID（UUID 文本）
    fn id(&self) -> String;
    /// 最近一段时间内的随机时间戳
    fn recent_timestamp(&self) -> DateTime<Utc>;
    fn role(&self) -> Role;
    fn category(&self) -> Category;
    /// 两位小数的正数价格
    fn price(&self) -> f64;
    fn stock(&self) -> u32;
    /// 完整的随机用户
    fn user(&self) -> User;
    /// 完整的随机商品
    fn product(&self) -> Product;
}

/// 可由生成器构造的记录
pub trait Mockable: Record {
    /// 使用指定 ID 生成一条完整的随机记录
    fn mock(id: String, generator: &dyn MockGenerator) -> Self;

    /// 由调用方补丁组装新记录
    ///
    /// 缺失的必填字段使用占位文本或生成器的随机值补齐，图片类字段走默认值替换
    fn assemble(
        id: String,
        created_at: DateTime<Utc>,
        patch: Self::Patch,
        generator: &dyn MockGenerator,
    ) -> Self;
}

impl Mockable for User {
    fn mock(id: String, generator: &dyn MockGenerator) -> Self {
        Self {
            id,
            ..generator.user()
        }
    }

    fn assemble(
        id: String,
        created_at: DateTime<Utc>,
        patch: UserPatch,
        _generator: &dyn MockGenerator,
    ) -> Self {
        Self {
            id,
            name: non_blank(patch.name).unwrap_or_else(|| defaults::PLACEHOLDER_USER_NAME.to_string()),
            email: non_blank(patch.email).unwrap_or_else(|| defaults::placeholder_email(created_at)),
            role: patch.role.unwrap_or_default(),
            avatar: defaults::avatar_or_default(patch.avatar.as_deref()),
            created_at,
        }
    }
}

impl Mockable for Product {
    fn mock(id: String, generator: &dyn MockGenerator) -> Self {
        Self {
            id,
            ..generator.product()
        }
    }

    fn assemble(
        id: String,
        created_at: DateTime<Utc>,
        patch: ProductPatch,
        generator: &dyn MockGenerator,
    ) -> Self {
        Self {
            id,
            name: non_blank(patch.name)
                .unwrap_or_else(|| defaults::PLACEHOLDER_PRODUCT_NAME.to_string()),
            description: non_blank(patch.description)
                .unwrap_or_else(|| defaults::PLACEHOLDER_DESCRIPTION.to_string()),
            // 价格必须为正，0 或负数视为缺失
            price: patch
                .price
                .filter(|price| *price > 0.0)
                .unwrap_or_else(|| generator.price()),
            category: patch.category.unwrap_or_else(|| generator.category()),
            stock: patch.stock.unwrap_or_else(|| generator.stock()),
            image_url: defaults::image_or_default(patch.image_url.as_deref()),
            created_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// createdAt 时间窗口上限（天）
const MAX_RECENT_DAYS: i64 = 3650;

/// 数据生成器配置
///
/// 控制生成数据的取值范围
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// createdAt 落在最近多少天内，取值限制在 1..=3650
    pub recent_days: i64,
    /// 商品价格范围
    pub price_range: RangeInclusive<f64>,
    /// 商品库存上限（含）
    pub stock_max: u32,
}

impl Default for GeneratorConfig {
    /// 默认配置：最近 1 天，价格 10-1000，库存 0-100
    fn default() -> Self {
        Self {
            recent_days: 1,
            price_range: 10.0..=1000.0,
            stock_max: 100,
        }
    }
}

/// 基于 fake 的随机数据生成器
///
/// 内部 RNG 由互斥锁保护，可在多个 handler 间共享
pub struct DataGenerator {
    config: GeneratorConfig,
    rng: Mutex<StdRng>,
}

impl DataGenerator {
    /// 创建使用系统熵初始化的生成器
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// 创建使用固定种子的生成器，相同种子产生相同序列
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// 使用默认配置创建生成器
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// 批量生成用户
    pub fn generate_users(&self, count: usize) -> Vec<User> {
        (0..count).map(|_| self.user()).collect()
    }

    /// 批量生成商品
    pub fn generate_products(&self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.product()).collect()
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut *rng)
    }

    fn uuid(rng: &mut StdRng) -> String {
        uuid::Builder::from_random_bytes(rng.random())
            .into_uuid()
            .to_string()
    }

    fn alphanumeric(rng: &mut StdRng, len: usize) -> String {
        rng.sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    fn timestamp(&self, rng: &mut StdRng) -> DateTime<Utc> {
        let window_secs = self.config.recent_days.clamp(1, MAX_RECENT_DAYS) * 24 * 3600;
        Utc::now() - Duration::seconds(rng.random_range(0..window_secs))
    }

    fn pick_role(rng: &mut StdRng) -> Role {
        Role::ALL[rng.random_range(0..Role::ALL.len())]
    }

    fn pick_category(rng: &mut StdRng) -> Category {
        Category::ALL[rng.random_range(0..Category::ALL.len())]
    }

    fn pick_price(&self, rng: &mut StdRng) -> f64 {
        let raw: f64 = rng.random_range(self.config.price_range.clone());
        // 保留两位小数，且不低于 0.01
        ((raw * 100.0).round() / 100.0).max(0.01)
    }

    fn pick_stock(&self, rng: &mut StdRng) -> u32 {
        rng.random_range(0..=self.config.stock_max)
    }

    fn product_name(rng: &mut StdRng) -> String {
        format!(
            "{} {} {}",
            PRODUCT_ADJECTIVES[rng.random_range(0..PRODUCT_ADJECTIVES.len())],
            PRODUCT_MATERIALS[rng.random_range(0..PRODUCT_MATERIALS.len())],
            PRODUCT_NOUNS[rng.random_range(0..PRODUCT_NOUNS.len())],
        )
    }
}

impl MockGenerator for DataGenerator {
    fn id(&self) -> String {
        self.with_rng(Self::uuid)
    }

    fn recent_timestamp(&self) -> DateTime<Utc> {
        self.with_rng(|rng| self.timestamp(rng))
    }

    fn role(&self) -> Role {
        self.with_rng(Self::pick_role)
    }

    fn category(&self) -> Category {
        self.with_rng(Self::pick_category)
    }

    fn price(&self) -> f64 {
        self.with_rng(|rng| self.pick_price(rng))
    }

    fn stock(&self) -> u32 {
        self.with_rng(|rng| self.pick_stock(rng))
    }

    fn user(&self) -> User {
        self.with_rng(|rng| {
            let name: String = Name().fake_with_rng(rng);
            let email: String = SafeEmail().fake_with_rng(rng);

            User {
                id: Self::uuid(rng),
                name,
                email,
                role: Self::pick_role(rng),
                avatar: format!("https://i.pravatar.cc/150?u={}", Self::alphanumeric(rng, 8)),
                created_at: self.timestamp(rng),
            }
        })
    }

    fn product(&self) -> Product {
        self.with_rng(|rng| {
            let description: String = Sentence(8..16).fake_with_rng(rng);

            Product {
                id: Self::uuid(rng),
                name: Self::product_name(rng),
                description,
                price: self.pick_price(rng),
                category: Self::pick_category(rng),
                stock: self.pick_stock(rng),
                image_url: format!(
                    "https://picsum.photos/seed/{}/200/300",
                    Self::alphanumeric(rng, 8)
                ),
                created_at: self.timestamp(rng),
            }
        })
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
