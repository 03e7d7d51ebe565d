//! # armctl CLI
//!
//! 在 KUKA iiwa 14 参考模型上评估与仿真力矩控制器。
//!
//! ```bash
//! # 列出已注册控制器
//! armctl-cli list --verbose
//!
//! # 计算单步力矩
//! armctl-cli torque --config impedance.toml --q 0,0.5,0,-1.2,0,0.6,0 --action 0.1,0,0,0,0,0
//!
//! # 闭环仿真 2 秒
//! armctl-cli simulate --config inverse_dynamics.toml --action 0.3,0.7,-0.2,-1,0.1,0.4,0.2 -n 2000
//! ```
//!
//! 日志级别通过 `RUST_LOG` 控制。

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod validation;

use commands::{ListCommand, SimulateCommand, TorqueCommand};

/// armctl CLI - 力矩控制器命令行工具
#[derive(Parser, Debug)]
#[command(name = "armctl-cli")]
#[command(about = "Evaluate and simulate robot arm torque controllers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 列出已注册控制器
    List {
        #[command(flatten)]
        args: ListCommand,
    },

    /// 计算单步力矩
    Torque {
        #[command(flatten)]
        args: TorqueCommand,
    },

    /// 闭环仿真
    Simulate {
        #[command(flatten)]
        args: SimulateCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("armctl_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { args } => args.execute(),
        Commands::Torque { args } => args.execute(),
        Commands::Simulate { args } => args.execute(),
    }
}
