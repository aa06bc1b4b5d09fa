//! 记录模型
//!
//! 后台管理的两类记录：用户与商品，以及对应的部分更新补丁类型。

pub mod product;
pub mod user;

pub use product::{Category, Product, ProductPatch};
pub use user::{Role, User, UserPatch};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 记录类型的公共约束
///
/// 每类记录都有不可变的 `id` 与 `createdAt`，以及一个不包含这两个字段的补丁类型。
/// 补丁既用于创建（部分数据）也用于更新。
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// 部分字段补丁，所有字段可选
    type Patch: Clone + Default + Send + Sync + 'static;

    /// 记录类型标签，用于日志、错误与指标
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    /// 将补丁中提供的字段浅合并到当前记录
    ///
    /// 图片类字段传入空白字符串时替换为默认 URL
    fn apply(&mut self, patch: Self::Patch);
}

/// 按创建时间倒序排列（最新在前）
pub fn sort_newest_first<T: Record>(records: &mut [T]) {
    records.sort_by_key(|record| std::cmp::Reverse(record.created_at()));
}
