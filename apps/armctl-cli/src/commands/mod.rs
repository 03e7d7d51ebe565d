//! 命令定义和实现

pub mod list;
pub mod simulate;
pub mod torque;

pub use list::ListCommand;
pub use simulate::SimulateCommand;
pub use torque::TorqueCommand;

use crate::validation::parse_vector;
use anyhow::{Context, Result};
use armctl_control::{ControllerFile, ControllerRegistry, TorqueController};
use armctl_physics::{ArmSimulator, JointState, ModelDynamics, RobotDescription, SerialChain};
use clap::Args;
use nalgebra::DVector;
use std::path::PathBuf;

/// 机器人与控制器的公共参数
#[derive(Args, Debug, Clone)]
pub struct RobotArgs {
    /// 控制器配置文件（TOML）
    #[arg(short, long)]
    pub config: PathBuf,

    /// 初始关节位置（弧度），逗号分隔，缺省为零位
    #[arg(long)]
    pub q: Option<String>,

    /// 初始关节速度（rad/s），逗号分隔，缺省为零
    #[arg(long)]
    pub qd: Option<String>,

    /// 控制器动作，逗号分隔；缺省时保持当前位姿
    #[arg(short, long, allow_hyphen_values = true)]
    pub action: Option<String>,

    /// 被控对象不含重力（控制模型随之去掉重力）
    #[arg(long)]
    pub no_gravity: bool,

    /// 只让控制模型不含重力，被控对象保留重力
    #[arg(long)]
    pub control_no_gravity: bool,
}

fn iiwa14(no_gravity: bool) -> SerialChain {
    let chain = SerialChain::kuka_iiwa14();
    if no_gravity { chain.without_gravity() } else { chain }
}

/// 在被控对象当前状态下，用控制模型计算力矩
pub fn control_torque(
    ctrl: &dyn TorqueController,
    model: &SerialChain,
    sim: &ArmSimulator,
) -> Result<DVector<f64>> {
    let robot = ModelDynamics::new(model, sim)?;
    Ok(ctrl.torque(&robot)?)
}

impl RobotArgs {
    /// 创建仿真器并设置初始状态
    pub fn simulator(&self) -> Result<ArmSimulator> {
        let mut sim = ArmSimulator::new(iiwa14(self.no_gravity))?;
        let dof = sim.joint_count();

        let mut state = JointState::zeros(dof);
        if let Some(q) = &self.q {
            state.positions = DVector::from_vec(parse_vector("q", q, dof)?);
        }
        if let Some(qd) = &self.qd {
            state.velocities = DVector::from_vec(parse_vector("qd", qd, dof)?);
        }
        sim.set_state(state)?;
        Ok(sim)
    }

    /// 控制器做逆动力学所用的模型
    pub fn control_model(&self) -> SerialChain {
        iiwa14(self.no_gravity || self.control_no_gravity)
    }

    /// 加载配置并构造控制器，然后应用动作（或锚定当前位姿）
    pub fn controller(&self, sim: &ArmSimulator) -> Result<Box<dyn TorqueController>> {
        let file = ControllerFile::load_from_file(&self.config)
            .with_context(|| format!("加载控制器配置失败: {}", self.config.display()))?;
        let mut ctrl = file.build(&ControllerRegistry::with_builtin(), sim)?;

        match &self.action {
            Some(text) => {
                let action = parse_vector("action", text, ctrl.action_space().dim())?;
                ctrl.set_action(&action, sim)?;
            },
            None => ctrl.reset(sim)?,
        }
        Ok(ctrl)
    }
}
