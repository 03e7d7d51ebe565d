//! 闭环仿真命令
//!
//! 控制器每步计算力矩，仿真器以半隐式欧拉积分推进。

use super::{RobotArgs, control_torque};
use crate::validation::validate_time_step;
use anyhow::Result;
use armctl_physics::{Dynamics, Kinematics};
use clap::Args;
use tracing::{debug, info};

/// 仿真命令参数
#[derive(Args, Debug)]
pub struct SimulateCommand {
    #[command(flatten)]
    pub robot: RobotArgs,

    /// 仿真步数
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub steps: usize,

    /// 时间步长（秒）
    #[arg(long, default_value_t = 1e-3)]
    pub dt: f64,

    /// 打印间隔（步），0 表示只打印最终状态
    #[arg(long, default_value_t = 0)]
    pub print_every: usize,

    /// 追踪的参考点
    #[arg(long, default_value = "peg_tip")]
    pub frame: String,

    /// 以 JSON 输出最终关节状态
    #[arg(long)]
    pub json: bool,
}

impl SimulateCommand {
    pub fn execute(&self) -> Result<()> {
        validate_time_step(self.dt)?;
        let mut sim = self.robot.simulator()?;
        let ctrl = self.robot.controller(&sim)?;
        let model = self.robot.control_model();
        info!(
            controller = ctrl.name(),
            steps = self.steps,
            dt = self.dt,
            control_gravity = ?model.gravity(),
            "simulation started"
        );

        for step in 0..self.steps {
            let torque = control_torque(ctrl.as_ref(), &model, &sim)?;
            sim.step(&torque, self.dt)?;

            if self.print_every > 0 && (step + 1) % self.print_every == 0 {
                let pose = sim.frame_pose(&self.frame)?;
                println!(
                    "t={:.3}s {}: [{:.4}, {:.4}, {:.4}]",
                    (step + 1) as f64 * self.dt,
                    self.frame,
                    pose.position.x,
                    pose.position.y,
                    pose.position.z
                );
            }
            debug!(step, "step complete");
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(sim.state())?);
            return Ok(());
        }

        let pose = sim.frame_pose(&self.frame)?;
        println!("final joint positions:");
        for (i, q) in sim.joint_positions().iter().enumerate() {
            println!("  J{}: {:>8.4} rad", i + 1, q);
        }
        println!(
            "final {} position: [{:.4}, {:.4}, {:.4}]",
            self.frame, pose.position.x, pose.position.y, pose.position.z
        );
        Ok(())
    }
}
