//! 可观测性
//!
//! 日志与指标在进程启动时一次性初始化，返回的守卫需持有到进程退出。

pub mod metrics;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;

pub use crate::config::ObservabilityConfig;

/// 可观测性守卫，持有指标服务
pub struct ObservabilityGuard {
    metrics: Option<metrics::MetricsHandle>,
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!(metrics = self.metrics.is_some(), "可观测性组件关闭");
    }
}

/// 初始化日志，`metrics_enabled` 时再启动 Prometheus 指标服务
///
/// ```ignore
/// let config = admin_shared::config::AppConfig::load("admin-server")?;
/// let _guard = admin_shared::observability::init(&config.observability).await?;
/// ```
pub async fn init(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    tracing::init(config)?;

    let metrics = if config.metrics_enabled {
        Some(metrics::init(config).await?)
    } else {
        None
    };

    info!(
        service = %config.service_name,
        log_format = %config.log_format,
        metrics_enabled = config.metrics_enabled,
        "可观测性初始化完成"
    );

    Ok(ObservabilityGuard { metrics })
}
