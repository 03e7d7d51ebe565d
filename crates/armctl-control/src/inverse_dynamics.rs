//! 逆动力学 PD 控制器
//!
//! 关节空间 PD 律给出期望加速度，再经逆动力学换算为力矩：
//!
//! ```text
//! q̈_des = kp ⊙ (q_set - q) + kd ⊙ (q̇_set - q̇)
//! τ     = ID(q̈_des)
//! ```
//!
//! 逆动力学结果已经包含重力/科氏力补偿，因此不再叠加其它项。
//! `q̇_set` 固定为零（静态姿态调节）。
//!
//! 两个变体共享同一套 PD 律（[`JointPdLaw`]），只在动作解释上不同：
//!
//! - [`InverseDynamicsController`]: 动作是**绝对**关节目标
//! - [`RelativeInverseDynamicsController`]: 动作是相对**当前**关节位置的增量

use crate::action_space::ActionSpace;
use crate::controller::{TorqueController, check_joint_dim, validate_action};
use crate::error::{ControlError, Result};
use crate::gains::{DerivativeGain, Gain};
use armctl_physics::{Robot, RobotDescription};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// 逆动力学 PD 控制器配置（两个变体通用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InverseDynamicsConfig {
    /// 比例增益（1/s²）
    pub kp: Gain,

    /// 微分增益（1/s），`"auto"` 表示 `2·sqrt(kp)`
    pub kd: DerivativeGain,

    /// 初始关节位置设定点，缺省为全零
    pub initial_setpoint: Option<Vec<f64>>,

    /// 是否把动作裁剪到动作空间内
    pub clip_actions: bool,
}

impl Default for InverseDynamicsConfig {
    fn default() -> Self {
        Self {
            kp: Gain::Scalar(100.0),
            kd: DerivativeGain::Auto,
            initial_setpoint: None,
            clip_actions: false,
        }
    }
}

/// 关节空间 PD + 逆动力学
#[derive(Debug, Clone)]
pub struct JointPdLaw {
    kp: DVector<f64>,
    kd: DVector<f64>,
    position_setpoint: DVector<f64>,
    velocity_setpoint: DVector<f64>,
}

impl JointPdLaw {
    /// 从配置展开增益与初始设定点
    pub fn from_config(config: &InverseDynamicsConfig, dof: usize) -> Result<Self> {
        let kp = config.kp.resolve("kp", dof)?;
        let kd = config.kd.resolve(&kp)?;
        let position_setpoint = match &config.initial_setpoint {
            Some(values) if values.len() != dof => {
                return Err(ControlError::InvalidConfig(format!(
                    "initial_setpoint has {} entries, expected {dof}",
                    values.len()
                )));
            },
            Some(values) if !values.iter().all(|v| v.is_finite()) => {
                return Err(ControlError::InvalidConfig(
                    "initial_setpoint must be finite".into(),
                ));
            },
            Some(values) => DVector::from_column_slice(values),
            None => DVector::zeros(dof),
        };
        Ok(Self {
            kp,
            kd,
            position_setpoint,
            velocity_setpoint: DVector::zeros(dof),
        })
    }

    /// 比例增益
    pub fn kp(&self) -> &DVector<f64> {
        &self.kp
    }

    /// 微分增益
    pub fn kd(&self) -> &DVector<f64> {
        &self.kd
    }

    /// 关节位置设定点
    pub fn position_setpoint(&self) -> &DVector<f64> {
        &self.position_setpoint
    }

    /// 关节速度设定点（恒为零）
    pub fn velocity_setpoint(&self) -> &DVector<f64> {
        &self.velocity_setpoint
    }

    /// 关节数（构造时确定）
    pub fn dof(&self) -> usize {
        self.kp.len()
    }

    fn set_position_setpoint(&mut self, setpoint: DVector<f64>) {
        debug!(setpoint = ?setpoint, "joint setpoint updated");
        self.position_setpoint = setpoint;
    }

    /// 以当前关节位置为设定点
    fn hold_current(&mut self, robot: &dyn Robot) -> Result<()> {
        let positions = robot.joint_positions();
        check_joint_dim("joint positions", self.dof(), positions.len())?;
        self.set_position_setpoint(positions.clone());
        Ok(())
    }

    /// 期望关节加速度
    pub fn desired_acceleration(&self, robot: &dyn Robot) -> Result<DVector<f64>> {
        let positions = robot.joint_positions();
        let velocities = robot.joint_velocities();
        check_joint_dim("joint positions", self.dof(), positions.len())?;
        check_joint_dim("joint velocities", self.dof(), velocities.len())?;

        let position_error = &self.position_setpoint - positions;
        let velocity_error = &self.velocity_setpoint - velocities;
        Ok(self.kp.component_mul(&position_error) + self.kd.component_mul(&velocity_error))
    }

    /// 经逆动力学求得力矩
    pub fn torque(&self, robot: &dyn Robot) -> Result<DVector<f64>> {
        let acceleration = self.desired_acceleration(robot)?;
        let torque = robot.inverse_dynamics(&acceleration)?;
        check_joint_dim("inverse dynamics torque", self.dof(), torque.len())?;
        trace!(?acceleration, ?torque, "inverse dynamics torque");
        Ok(torque)
    }
}

/// 绝对目标逆动力学 PD 控制器
#[derive(Debug, Clone)]
pub struct InverseDynamicsController {
    law: JointPdLaw,
    action_space: ActionSpace,
    clip_actions: bool,
}

impl InverseDynamicsController {
    /// 注册名
    pub const NAME: &'static str = "InverseDynamicsController";

    /// 创建控制器，动作空间取关节限位
    pub fn new(config: InverseDynamicsConfig, robot: &dyn RobotDescription) -> Result<Self> {
        Ok(Self {
            law: JointPdLaw::from_config(&config, robot.joint_count())?,
            action_space: ActionSpace::from_joint_limits(&robot.joint_limits()),
            clip_actions: config.clip_actions,
        })
    }

    /// PD 律（增益与设定点）
    pub fn law(&self) -> &JointPdLaw {
        &self.law
    }
}

impl TorqueController for InverseDynamicsController {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn set_action(&mut self, action: &[f64], _robot: &dyn Robot) -> Result<()> {
        let action = validate_action(Self::NAME, action, &self.action_space, self.clip_actions)?;
        self.law.set_position_setpoint(action);
        Ok(())
    }

    fn torque(&self, robot: &dyn Robot) -> Result<DVector<f64>> {
        self.law.torque(robot)
    }

    fn reset(&mut self, robot: &dyn Robot) -> Result<()> {
        self.law.hold_current(robot)
    }
}

/// 增量目标逆动力学 PD 控制器
///
/// `q_set = q + action`。动作空间无界（增量不受关节限位约束）。
#[derive(Debug, Clone)]
pub struct RelativeInverseDynamicsController {
    law: JointPdLaw,
    action_space: ActionSpace,
    clip_actions: bool,
}

impl RelativeInverseDynamicsController {
    /// 注册名
    pub const NAME: &'static str = "RelativeInverseDynamicsController";

    /// 创建控制器
    pub fn new(config: InverseDynamicsConfig, robot: &dyn RobotDescription) -> Result<Self> {
        let dof = robot.joint_count();
        Ok(Self {
            law: JointPdLaw::from_config(&config, dof)?,
            action_space: ActionSpace::unbounded(dof),
            clip_actions: config.clip_actions,
        })
    }

    /// PD 律（增益与设定点）
    pub fn law(&self) -> &JointPdLaw {
        &self.law
    }
}

impl TorqueController for RelativeInverseDynamicsController {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn set_action(&mut self, action: &[f64], robot: &dyn Robot) -> Result<()> {
        let delta = validate_action(Self::NAME, action, &self.action_space, self.clip_actions)?;
        let positions = robot.joint_positions();
        check_joint_dim("joint positions", self.law.dof(), positions.len())?;
        self.law.set_position_setpoint(positions + delta);
        Ok(())
    }

    fn torque(&self, robot: &dyn Robot) -> Result<DVector<f64>> {
        self.law.torque(robot)
    }

    fn reset(&mut self, robot: &dyn Robot) -> Result<()> {
        self.law.hold_current(robot)
    }
}
