//! CLI 命令定义

use clap::{Parser, Subcommand};

/// 后台管理服务命令行工具
#[derive(Parser, Debug)]
#[command(name = "admin-server")]
#[command(version, about = "用户与商品后台管理服务")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 HTTP 服务
    ///
    /// 配置了数据库时以 PostgreSQL 为主存储，失败的请求由内存兜底存储处理
    Serve {
        /// 服务端口，默认取配置文件
        #[arg(short, long)]
        port: Option<u16>,

        /// 不连接数据库，所有请求由内存兜底存储处理
        #[arg(long)]
        memory_only: bool,
    },

    /// 生成模拟数据
    Generate {
        /// 用户数量
        #[arg(short, long, default_value = "10")]
        users: usize,

        /// 商品数量
        #[arg(short, long, default_value = "15")]
        products: usize,

        /// 随机种子，相同种子生成相同数据
        #[arg(short, long)]
        seed: Option<u64>,

        /// 输出到文件（JSON 格式），默认打印到标准输出
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 向数据库写入模拟数据
    ///
    /// 总是先创建 admin@example.com 管理员
    Seed {
        /// 用户数量（不含管理员）
        #[arg(short, long, default_value = "10")]
        users: usize,

        /// 商品数量
        #[arg(short, long, default_value = "15")]
        products: usize,

        /// 写入前清空已有数据
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["admin-server", "serve"]);
        match cli.command {
            Commands::Serve { port, memory_only } => {
                assert_eq!(port, None);
                assert!(!memory_only);
            }
            _ => panic!("预期 Serve 命令"),
        }
        assert!(cli.log_level.is_none());

        let cli = Cli::parse_from([
            "admin-server",
            "--log-level",
            "debug",
            "serve",
            "--port",
            "8080",
            "--memory-only",
        ]);
        match cli.command {
            Commands::Serve { port, memory_only } => {
                assert_eq!(port, Some(8080));
                assert!(memory_only);
            }
            _ => panic!("预期 Serve 命令"),
        }
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["admin-server", "generate"]);
        match cli.command {
            Commands::Generate {
                users,
                products,
                seed,
                output,
            } => {
                assert_eq!(users, 10);
                assert_eq!(products, 15);
                assert!(seed.is_none());
                assert!(output.is_none());
            }
            _ => panic!("预期 Generate 命令"),
        }

        let cli = Cli::parse_from([
            "admin-server",
            "generate",
            "-u",
            "3",
            "-p",
            "4",
            "--seed",
            "42",
            "-o",
            "data.json",
        ]);
        match cli.command {
            Commands::Generate {
                users,
                products,
                seed,
                output,
            } => {
                assert_eq!(users, 3);
                assert_eq!(products, 4);
                assert_eq!(seed, Some(42));
                assert_eq!(output.as_deref(), Some("data.json"));
            }
            _ => panic!("预期 Generate 命令"),
        }
    }

    #[test]
    fn test_cli_parse_seed() {
        let cli = Cli::parse_from(["admin-server", "seed", "--users", "20", "--reset"]);
        match cli.command {
            Commands::Seed {
                users,
                products,
                reset,
            } => {
                assert_eq!(users, 20);
                assert_eq!(products, 15);
                assert!(reset);
            }
            _ => panic!("预期 Seed 命令"),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
