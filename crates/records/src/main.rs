//! Admin Server
//!
//! 后台管理服务的命令行入口点。

use anyhow::Context;
use clap::Parser;

use admin_records::cli::{Cli, CommandRunner, Commands};
use admin_shared::config::AppConfig;
use admin_shared::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load("admin-server").context("加载配置失败")?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    let _guard = observability::init(&config.observability).await?;

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Serve { port, memory_only } => {
            runner.run_serve(port, memory_only).await?;
        }
        Commands::Generate {
            users,
            products,
            seed,
            output,
        } => {
            runner.run_generate(users, products, seed, output)?;
        }
        Commands::Seed {
            users,
            products,
            reset,
        } => {
            runner.run_seed(users, products, reset).await?;
        }
    }

    Ok(())
}
