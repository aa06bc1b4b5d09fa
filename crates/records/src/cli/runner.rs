//! 命令执行器
//!
//! 将命令行参数转化为服务启动、数据生成和数据库填充操作。

use std::fs;
use std::io::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use admin_shared::config::AppConfig;
use admin_shared::database::Database;

use crate::api::{self, AppState};
use crate::generators::{DataGenerator, GeneratorConfig};
use crate::models::{Product, Role, User};
use crate::service::{PgRecordService, RecordServices};
use crate::store::FallbackStore;

/// 种子管理员
pub const ADMIN_NAME: &str = "Admin";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_AVATAR: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=admin";

/// generate 命令的输出结构
#[derive(Debug, Serialize)]
pub struct GeneratedData {
    pub users: Vec<User>,
    pub products: Vec<Product>,
}

/// 命令执行器
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 执行 serve 命令
    ///
    /// 未配置数据库或指定 `--memory-only` 时所有请求由兜底存储处理；
    /// 否则以 PostgreSQL 为主存储。迁移失败只记录告警，服务照常启动。
    pub async fn run_serve(&self, port: Option<u16>, memory_only: bool) -> Result<()> {
        let store = Arc::new(FallbackStore::new(&self.config.fallback));

        let services = if memory_only || !self.config.database.is_configured() {
            info!("以纯内存模式启动");
            RecordServices::memory(store)
        } else {
            let db = Database::connect_lazy(&self.config.database).context("创建数据库连接池失败")?;
            if let Err(e) = sqlx::migrate!("./migrations").run(db.pool()).await {
                warn!(error = %e, "数据库迁移失败，请求将在失败时由内存兜底存储处理");
            }
            info!("以 PostgreSQL 为主存储启动");
            RecordServices::with_database(db.pool().clone(), store)
        };

        let app = api::routes(Arc::new(AppState::new(services)))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let mut config = self.config.clone();
        if let Some(port) = port {
            config.server.port = port;
        }
        let addr: SocketAddr = config.server_addr().parse().context("无效的监听地址")?;
        let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

        info!("服务已启动: http://{}", addr);
        info!("  GET /health - 健康检查");
        info!("  GET/POST /api/users, GET/PATCH/DELETE /api/users/{{id}}");
        info!("  GET/POST /api/products, GET/PATCH/DELETE /api/products/{{id}}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("服务已停止");
        Ok(())
    }

    /// 执行 generate 命令
    pub fn run_generate(
        &self,
        users: usize,
        products: usize,
        seed: Option<u64>,
        output: Option<String>,
    ) -> Result<()> {
        info!(users, products, seed = ?seed, "生成模拟数据");

        let data = generate_data(&self.generator_config(), users, products, seed);
        let json = serde_json::to_string_pretty(&data).context("序列化数据失败")?;

        match output {
            Some(path) => {
                let mut file = fs::File::create(&path).context("创建输出文件失败")?;
                file.write_all(json.as_bytes()).context("写入文件失败")?;
                info!(path, "数据已输出到文件");
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    /// 执行 seed 命令
    pub async fn run_seed(&self, users: usize, products: usize, reset: bool) -> Result<()> {
        if !self.config.database.is_configured() {
            bail!("未配置数据库地址，请设置 ADMIN_DATABASE__URL");
        }

        let db = Database::connect_lazy(&self.config.database).context("创建数据库连接池失败")?;
        db.health_check().await.context("数据库不可达")?;
        sqlx::migrate!("./migrations")
            .run(db.pool())
            .await
            .context("数据库迁移失败")?;

        let user_repo = PgRecordService::<User>::new(db.pool().clone());
        let product_repo = PgRecordService::<Product>::new(db.pool().clone());

        if reset {
            let removed_products = product_repo.clear().await?;
            let removed_users = user_repo.clear().await?;
            info!(removed_users, removed_products, "已清空现有数据");
        }

        user_repo.insert(&admin_user()).await.context("创建管理员失败")?;

        let data = generate_data(&self.generator_config(), users, products, None);
        for user in &data.users {
            user_repo.insert(user).await?;
        }
        for product in &data.products {
            product_repo.insert(product).await?;
        }

        db.close().await;

        println!("\n数据填充完成:");
        println!("{}", "-".repeat(30));
        println!("用户数量: {}", data.users.len() + 1);
        println!("商品数量: {}", data.products.len());
        println!("{}", "-".repeat(30));

        Ok(())
    }

    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            recent_days: self.config.fallback.recent_days,
            ..Default::default()
        }
    }
}

/// 生成指定数量的用户与商品，指定种子时结果可复现
pub fn generate_data(
    config: &GeneratorConfig,
    users: usize,
    products: usize,
    seed: Option<u64>,
) -> GeneratedData {
    let generator = match seed {
        Some(seed) => DataGenerator::seeded(config.clone(), seed),
        None => DataGenerator::new(config.clone()),
    };

    GeneratedData {
        users: generator.generate_users(users),
        products: generator.generate_products(products),
    }
}

/// 种子管理员账号
pub fn admin_user() -> User {
    User {
        id: Uuid::new_v4().to_string(),
        name: ADMIN_NAME.to_string(),
        email: ADMIN_EMAIL.to_string(),
        role: Role::Admin,
        avatar: ADMIN_AVATAR.to_string(),
        created_at: Utc::now(),
    }
}

/// 等待关闭信号（Ctrl+C）
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "安装 CTRL+C 信号处理器失败");
        return;
    }
    info!("收到关闭信号，正在停止服务...");
}
