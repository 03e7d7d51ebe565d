//! 任务空间阻抗控制器
//!
//! 在参考点上渲染一个虚拟弹簧，并在关节空间注入虚拟阻尼。
//!
//! # 控制律
//!
//! ```text
//! e     = [p_set - p ; log(q_set ⊗ q⁻¹)]            // 6 维位姿误差（世界系）
//! τ_k   = Jᵀ · (K ⊙ e)                              // 虚拟弹簧经雅可比转置映射
//! τ_id  = ID(q̈ = -D ⊙ q̇)                            // 补偿重力/科氏力并施加粘性制动
//! τ     = τ_id + τ_k
//! ```
//!
//! 阻尼项作为期望加速度送入逆动力学，重力、科氏力和惯性耦合随之一并抵消。
//!
//! # 动作
//!
//! 6 维 `[dx, dy, dz, rx, ry, rz]`，先逐维乘以动作缩放，再相对参考点
//! **当前**位姿形成新设定点：
//!
//! ```text
//! p_set = p + dx
//! q_set = integrate(q, dr)
//! ```

use crate::action_space::ActionSpace;
use crate::controller::{TorqueController, check_joint_dim, validate_action};
use crate::error::{ControlError, Result};
use crate::gains::Gain;
use crate::rotation;
use armctl_physics::{Robot, RobotDescription};
use nalgebra::{DVector, UnitQuaternion, Vector3, Vector6};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// 任务空间维度（3 平移 + 3 旋转）
pub const TASK_DIM: usize = 6;

/// 阻抗控制器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImpedanceConfig {
    /// 参考点名称
    pub frame: String,

    /// 平移动作缩放（m / 单位动作）
    pub pos_scale: f64,

    /// 旋转动作缩放（rad / 单位动作）
    pub rot_scale: f64,

    /// 刚度 `[kx, ky, kz, krx, kry, krz]`
    pub stiffness: [f64; 6],

    /// 关节空间阻尼（标量或逐关节）
    pub damping: Gain,

    /// 是否按动作空间裁剪动作（阻抗动作空间无界，实际不会裁剪）
    pub clip_actions: bool,
}

impl Default for ImpedanceConfig {
    fn default() -> Self {
        Self {
            frame: "peg_tip".to_string(),
            pos_scale: 0.1,
            rot_scale: 0.5,
            stiffness: [1.0, 1.0, 1.0, 0.1, 0.1, 0.1],
            damping: Gain::Scalar(0.0),
            clip_actions: false,
        }
    }
}

/// 任务空间阻抗控制器
#[derive(Debug, Clone)]
pub struct ImpedanceController {
    frame: String,
    scale: Vector6<f64>,
    stiffness: Vector6<f64>,
    damping: DVector<f64>,
    position_setpoint: Vector3<f64>,
    orientation_setpoint: UnitQuaternion<f64>,
    action_space: ActionSpace,
    clip_actions: bool,
}

impl ImpedanceController {
    /// 注册名
    pub const NAME: &'static str = "ImpedanceController";

    /// 创建控制器，设定点初始为原点 + 单位姿态
    ///
    /// 首次使用前通常应调用 [`TorqueController::reset`] 或 `set_action`
    /// 把设定点锚定到机器人当前位姿。
    pub fn new(config: ImpedanceConfig, robot: &dyn RobotDescription) -> Result<Self> {
        if !robot.has_frame(&config.frame) {
            return Err(ControlError::InvalidConfig(format!(
                "robot has no reference frame named {:?}",
                config.frame
            )));
        }
        for (name, value) in [("pos_scale", config.pos_scale), ("rot_scale", config.rot_scale)] {
            if !value.is_finite() {
                return Err(ControlError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        let stiffness = Gain::PerJoint(config.stiffness.to_vec()).resolve("stiffness", TASK_DIM)?;
        let damping = config.damping.resolve("damping", robot.joint_count())?;

        let (p, r) = (config.pos_scale, config.rot_scale);
        Ok(Self {
            frame: config.frame,
            scale: Vector6::new(p, p, p, r, r, r),
            stiffness: Vector6::from_column_slice(stiffness.as_slice()),
            damping,
            position_setpoint: Vector3::zeros(),
            orientation_setpoint: rotation::identity(),
            action_space: ActionSpace::unbounded(TASK_DIM),
            clip_actions: config.clip_actions,
        })
    }

    /// 参考点名称
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// 位置设定点
    pub fn position_setpoint(&self) -> &Vector3<f64> {
        &self.position_setpoint
    }

    /// 姿态设定点
    pub fn orientation_setpoint(&self) -> &UnitQuaternion<f64> {
        &self.orientation_setpoint
    }

    /// 刚度
    pub fn stiffness(&self) -> &Vector6<f64> {
        &self.stiffness
    }

    /// 关节空间阻尼
    pub fn damping(&self) -> &DVector<f64> {
        &self.damping
    }

    /// 参考点当前位置与姿态
    fn current_pose(&self, robot: &dyn Robot) -> Result<(Vector3<f64>, UnitQuaternion<f64>)> {
        let pose = robot.frame_pose(&self.frame)?;
        let orientation = rotation::rotation_matrix_to_quaternion(&pose.rotation)?;
        Ok((pose.position, orientation))
    }

    /// 当前 6 维位姿误差 `[Δp ; Δr]`
    pub fn pose_error(&self, robot: &dyn Robot) -> Result<Vector6<f64>> {
        let (position, orientation) = self.current_pose(robot)?;
        let dx = self.position_setpoint - position;
        let dr = rotation::quaternion_difference(&self.orientation_setpoint, &orientation);

        let mut error = Vector6::zeros();
        error.fixed_rows_mut::<3>(0).copy_from(&dx);
        error.fixed_rows_mut::<3>(3).copy_from(&dr);
        Ok(error)
    }
}

impl TorqueController for ImpedanceController {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn set_action(&mut self, action: &[f64], robot: &dyn Robot) -> Result<()> {
        let action = validate_action(Self::NAME, action, &self.action_space, self.clip_actions)?;
        let scaled = Vector6::from_column_slice(action.as_slice()).component_mul(&self.scale);
        let dx: Vector3<f64> = scaled.fixed_rows::<3>(0).into_owned();
        let dr: Vector3<f64> = scaled.fixed_rows::<3>(3).into_owned();

        let (position, orientation) = self.current_pose(robot)?;
        self.position_setpoint = position + dx;
        self.orientation_setpoint = rotation::integrate(&orientation, &dr);
        debug!(
            frame = %self.frame,
            position = ?self.position_setpoint,
            "impedance setpoint updated"
        );
        Ok(())
    }

    fn torque(&self, robot: &dyn Robot) -> Result<DVector<f64>> {
        let error = self.pose_error(robot)?;

        // 虚拟弹簧力经雅可比转置映射为广义力
        let jacobian = robot.frame_jacobian(&self.frame)?.stacked();
        let dof = self.damping.len();
        check_joint_dim("frame jacobian columns", dof, jacobian.ncols())?;
        let wrench = self.stiffness.component_mul(&error);
        let spring_torque = jacobian.transpose() * wrench;

        // 逆动力学抵消其余动力学，同时注入虚拟阻尼
        let velocities = robot.joint_velocities();
        check_joint_dim("joint velocities", dof, velocities.len())?;
        let acceleration = -self.damping.component_mul(velocities);
        let id_torque = robot.inverse_dynamics(&acceleration)?;
        check_joint_dim("inverse dynamics torque", dof, id_torque.len())?;

        trace!(pose_error = ?error, ?spring_torque, ?id_torque, "impedance torque");
        Ok(id_torque + spring_torque)
    }

    fn reset(&mut self, robot: &dyn Robot) -> Result<()> {
        let (position, orientation) = self.current_pose(robot)?;
        self.position_setpoint = position;
        self.orientation_setpoint = orientation;
        Ok(())
    }
}
