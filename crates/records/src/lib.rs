//! Admin Records
//!
//! 用户与商品的后台管理服务。PostgreSQL 为主存储，主存储失败时由进程内
//! 兜底存储（首次访问时预填充模拟数据）处理同一请求。
//!
//! # 主要模块
//!
//! - `models`: 用户、商品及其补丁类型
//! - `defaults`: 默认头像与商品图片
//! - `generators`: 模拟数据生成器
//! - `store`: 内存存储与兜底存储
//! - `service`: 记录服务接口及内存、PostgreSQL、兜底装饰器实现
//! - `api`: HTTP 路由
//! - `cli`: 命令行入口
//!
//! # 使用示例
//!
//! ```rust
//! use admin_records::models::UserPatch;
//! use admin_records::store::FallbackStore;
//!
//! let store = FallbackStore::default();
//! let user = store.users().create(UserPatch {
//!     name: Some("Alice".to_string()),
//!     ..Default::default()
//! });
//!
//! // 10 条预填充记录加新建的一条
//! assert_eq!(store.users().count(), 11);
//! assert_eq!(store.users().get(&user.id), Some(user));
//! ```

pub mod api;
pub mod cli;
pub mod defaults;
pub mod generators;
pub mod models;
pub mod service;
pub mod store;
