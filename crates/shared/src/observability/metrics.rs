//! 记录操作指标
//!
//! 安装 Prometheus recorder 并在独立端口提供 `/metrics`。
//! 计数器：
//! - `record_operations_total{kind, operation, backend}`
//! - `record_fallback_total{kind, operation}`

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::ObservabilityConfig;

const OPERATIONS_TOTAL: &str = "record_operations_total";
const FALLBACK_TOTAL: &str = "record_fallback_total";

/// 指标导出器，drop 时停止 `/metrics` 服务
pub struct MetricsHandle {
    server: JoinHandle<()>,
}

impl Drop for MetricsHandle {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// 安装全局 recorder 并启动指标服务
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("安装 Prometheus recorder 失败")?;

    describe();
    metrics::counter!("service_starts_total", "service" => config.service_name.clone())
        .increment(1);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("绑定指标端口失败: {}", addr))?;
    info!(%addr, "指标服务已启动");

    let app = router(prometheus);
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!(error = %e, "指标服务异常退出");
        }
    });

    Ok(MetricsHandle { server })
}

/// `/metrics` 路由
pub fn router(prometheus: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { prometheus.render() }))
}

fn describe() {
    metrics::describe_counter!(
        OPERATIONS_TOTAL,
        "Record operations by kind, operation and backend"
    );
    metrics::describe_counter!(
        FALLBACK_TOTAL,
        "Primary backend failures served by the in-memory fallback"
    );
}

/// 记录一次记录操作
#[inline]
pub fn record_operation(kind: &'static str, operation: &'static str, backend: &'static str) {
    metrics::counter!(
        OPERATIONS_TOTAL,
        "kind" => kind,
        "operation" => operation,
        "backend" => backend
    )
    .increment(1);
}

/// 记录一次主存储失败后的兜底切换
#[inline]
pub fn record_fallback(kind: &'static str, operation: &'static str) {
    metrics::counter!(FALLBACK_TOTAL, "kind" => kind, "operation" => operation).increment(1);
}
