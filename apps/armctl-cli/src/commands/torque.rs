//! 单步力矩计算命令

use super::{RobotArgs, control_torque};
use anyhow::Result;
use armctl_physics::{Dynamics, RobotDescription};
use clap::Args;
use serde::Serialize;

/// 力矩计算命令参数
#[derive(Args, Debug)]
pub struct TorqueCommand {
    #[command(flatten)]
    pub robot: RobotArgs,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

/// JSON 输出
#[derive(Debug, Serialize)]
struct TorqueReport {
    controller: &'static str,
    positions: Vec<f64>,
    velocities: Vec<f64>,
    torque: Vec<f64>,
}

impl TorqueCommand {
    pub fn execute(&self) -> Result<()> {
        let sim = self.robot.simulator()?;
        let ctrl = self.robot.controller(&sim)?;
        let model = self.robot.control_model();
        let torque = control_torque(ctrl.as_ref(), &model, &sim)?;

        if self.json {
            let report = TorqueReport {
                controller: ctrl.name(),
                positions: sim.joint_positions().iter().copied().collect(),
                velocities: sim.joint_velocities().iter().copied().collect(),
                torque: torque.iter().copied().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{} ({} joints)", ctrl.name(), sim.joint_count());
        for (i, tau) in torque.iter().enumerate() {
            println!("  J{}: {:>10.4} N·m", i + 1, tau);
        }
        Ok(())
    }
}
