//! 列出已注册控制器

use anyhow::Result;
use armctl_control::{ControllerRegistry, TorqueController};
use armctl_physics::{ArmSimulator, SerialChain};
use clap::Args;

/// 列出命令参数
#[derive(Args, Debug)]
pub struct ListCommand {
    /// 同时显示默认配置下的动作空间
    #[arg(short, long)]
    pub verbose: bool,
}

impl ListCommand {
    pub fn execute(&self) -> Result<()> {
        let registry = ControllerRegistry::with_builtin();
        let sim = ArmSimulator::new(SerialChain::kuka_iiwa14())?;

        for name in registry.names() {
            if !self.verbose {
                println!("{name}");
                continue;
            }
            let ctrl = registry.construct(name, &toml::Table::new(), &sim)?;
            println!("{name}");
            print_action_space(ctrl.as_ref());
        }
        Ok(())
    }
}

fn print_action_space(ctrl: &dyn TorqueController) {
    let space = ctrl.action_space();
    println!("  action dim: {}", space.dim());
    if space.is_bounded() {
        for (i, (lo, hi)) in space.low.iter().zip(space.high.iter()).enumerate() {
            println!("  [{i}] {lo:>8.3} .. {hi:<8.3}");
        }
    } else {
        println!("  unbounded");
    }
}
