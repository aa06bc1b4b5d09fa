//! 数据库连接管理模块
//!
//! 提供 PostgreSQL 连接池管理。连接池以惰性方式创建：数据库不可达时
//! 服务仍能启动，具体请求失败后由兜底装饰器切换到内存存储。

use crate::config::DatabaseConfig;
use crate::error::{AdminError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// 数据库连接池包装
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 创建惰性连接池
    ///
    /// 不会立即建立连接，首次查询时才连接数据库
    #[instrument(skip(config))]
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AdminError::Unavailable {
                backend: "postgres".to_string(),
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_lazy(url)?;

        info!("Database connection pool created (lazy)");

        Ok(Self { pool })
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AdminError::from)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
