//! Mock 机器人适配器
//!
//! 位姿、雅可比固定；逆动力学为仿射映射 `τ = M·q̈ + b`，
//! 便于精确断言控制器输出。可以注入适配器故障。

use armctl_physics::{
    Dynamics, FrameJacobian, FramePose, JointLimits, Kinematics, PhysicsError, RobotDescription,
};
use nalgebra::{DMatrix, DVector, Matrix3, Matrix3xX, Vector3};

/// 测试用机器人
#[derive(Debug, Clone)]
pub struct MockRobot {
    pub frame: String,
    pub pose: FramePose,
    pub jacobian: FrameJacobian,
    pub positions: DVector<f64>,
    pub velocities: DVector<f64>,
    pub limits: JointLimits,
    /// 逆动力学线性部分
    pub mass: DMatrix<f64>,
    /// 逆动力学偏置（重力 + 科氏力）
    pub bias: DVector<f64>,
    pub fail_kinematics: bool,
    pub fail_dynamics: bool,
}

impl MockRobot {
    /// `dof` 关节，单位质量矩阵，偏置 `0.1·(j+1)`，参考点名为 `tool`
    pub fn new(dof: usize) -> Self {
        let mut linear = Matrix3xX::zeros(dof);
        let mut angular = Matrix3xX::zeros(dof);
        for j in 0..dof {
            linear[(j % 3, j)] = 1.0 + j as f64;
            angular[((j + 1) % 3, j)] = 0.5;
        }
        Self {
            frame: "tool".to_string(),
            pose: FramePose {
                position: Vector3::new(0.4, 0.0, 0.6),
                rotation: Matrix3::identity(),
            },
            jacobian: FrameJacobian { linear, angular },
            positions: DVector::zeros(dof),
            velocities: DVector::zeros(dof),
            limits: JointLimits {
                low: DVector::from_element(dof, -2.0),
                high: DVector::from_element(dof, 2.0),
            },
            mass: DMatrix::identity(dof, dof),
            bias: DVector::from_fn(dof, |j, _| 0.1 * (j + 1) as f64),
            fail_kinematics: false,
            fail_dynamics: false,
        }
    }

    pub fn with_positions(mut self, positions: &[f64]) -> Self {
        self.positions = DVector::from_column_slice(positions);
        self
    }

    pub fn with_velocities(mut self, velocities: &[f64]) -> Self {
        self.velocities = DVector::from_column_slice(velocities);
        self
    }

    pub fn with_rotation(mut self, rotation: Matrix3<f64>) -> Self {
        self.pose.rotation = rotation;
        self
    }

    fn check_frame(&self, frame: &str) -> Result<(), PhysicsError> {
        if self.fail_kinematics || frame != self.frame {
            return Err(PhysicsError::UnknownFrame {
                name: frame.to_string(),
            });
        }
        Ok(())
    }
}

impl RobotDescription for MockRobot {
    fn joint_count(&self) -> usize {
        self.positions.len()
    }

    fn joint_limits(&self) -> JointLimits {
        self.limits.clone()
    }

    fn has_frame(&self, name: &str) -> bool {
        name == self.frame
    }
}

impl Kinematics for MockRobot {
    fn frame_pose(&self, frame: &str) -> Result<FramePose, PhysicsError> {
        self.check_frame(frame)?;
        Ok(self.pose.clone())
    }

    fn frame_jacobian(&self, frame: &str) -> Result<FrameJacobian, PhysicsError> {
        self.check_frame(frame)?;
        Ok(self.jacobian.clone())
    }
}

impl Dynamics for MockRobot {
    fn joint_positions(&self) -> &DVector<f64> {
        &self.positions
    }

    fn joint_velocities(&self) -> &DVector<f64> {
        &self.velocities
    }

    fn inverse_dynamics(&self, acceleration: &DVector<f64>) -> Result<DVector<f64>, PhysicsError> {
        if self.fail_dynamics {
            return Err(PhysicsError::SingularMassMatrix);
        }
        if acceleration.len() != self.mass.ncols() {
            return Err(PhysicsError::DimensionMismatch {
                what: "acceleration",
                expected: self.mass.ncols(),
                actual: acceleration.len(),
            });
        }
        Ok(&self.mass * acceleration + &self.bias)
    }
}
