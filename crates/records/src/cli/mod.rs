//! CLI 模块
//!
//! - `serve` - 启动 HTTP 服务
//! - `generate` - 生成模拟数据并输出 JSON
//! - `seed` - 向数据库写入模拟数据
//!
//! # 使用示例
//!
//! ```bash
//! # 纯内存模式启动
//! admin-server serve --port 3000 --memory-only
//!
//! # 生成可复现的数据
//! admin-server generate -u 5 -p 10 --seed 42 -o data.json
//!
//! # 清空并重新填充数据库
//! admin-server seed -u 20 -p 50 --reset
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
