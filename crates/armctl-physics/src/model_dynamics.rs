//! 独立控制模型
//!
//! 控制器用于逆动力学的模型不必与被控对象相同：例如被控对象带重力，
//! 而控制模型不含重力，此时重力由外部补偿或被有意忽略。
//!
//! [`ModelDynamics`] 把运动学查询与关节状态转发给被控对象，只把逆动力学
//! 换成在对象**当前状态**下对控制模型求解：
//!
//! ```text
//! τ = ID_model(q_plant, q̇_plant, q̈)
//! ```

use crate::adapter::{Dynamics, Kinematics, Robot, RobotDescription};
use crate::chain::SerialChain;
use crate::error::PhysicsError;
use crate::types::{FrameJacobian, FramePose, JointLimits};
use nalgebra::DVector;
use std::fmt;

/// 被控对象 + 控制模型
#[derive(Clone, Copy)]
pub struct ModelDynamics<'a> {
    model: &'a SerialChain,
    plant: &'a dyn Robot,
}

impl<'a> ModelDynamics<'a> {
    /// 组合控制模型与被控对象
    ///
    /// # 错误
    ///
    /// 模型非法或两者关节数不同时返回错误。
    pub fn new(model: &'a SerialChain, plant: &'a dyn Robot) -> Result<Self, PhysicsError> {
        model.validate()?;
        PhysicsError::check_dim("control model joints", plant.joint_count(), model.dof())?;
        Ok(Self { model, plant })
    }

    /// 控制模型
    pub fn model(&self) -> &SerialChain {
        self.model
    }
}

impl fmt::Debug for ModelDynamics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDynamics")
            .field("dof", &self.model.dof())
            .field("gravity", self.model.gravity())
            .finish_non_exhaustive()
    }
}

impl RobotDescription for ModelDynamics<'_> {
    fn joint_count(&self) -> usize {
        self.plant.joint_count()
    }

    fn joint_limits(&self) -> JointLimits {
        self.plant.joint_limits()
    }

    fn has_frame(&self, name: &str) -> bool {
        self.plant.has_frame(name)
    }
}

impl Kinematics for ModelDynamics<'_> {
    fn frame_pose(&self, frame: &str) -> Result<FramePose, PhysicsError> {
        self.plant.frame_pose(frame)
    }

    fn frame_jacobian(&self, frame: &str) -> Result<FrameJacobian, PhysicsError> {
        self.plant.frame_jacobian(frame)
    }
}

impl Dynamics for ModelDynamics<'_> {
    fn joint_positions(&self) -> &DVector<f64> {
        self.plant.joint_positions()
    }

    fn joint_velocities(&self) -> &DVector<f64> {
        self.plant.joint_velocities()
    }

    fn inverse_dynamics(&self, acceleration: &DVector<f64>) -> Result<DVector<f64>, PhysicsError> {
        self.model.inverse_dynamics(
            self.plant.joint_positions(),
            self.plant.joint_velocities(),
            acceleration,
        )
    }
}
