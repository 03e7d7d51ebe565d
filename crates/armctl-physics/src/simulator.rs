//! 参考仿真器
//!
//! 持有一个 [`SerialChain`] 与当前 [`JointState`]，实现 [`Robot`](crate::Robot)
//! 的全部适配器接口，并用半隐式欧拉积分推进一步：
//!
//! ```text
//! q̈     = FD(q, q̇, τ)
//! q̇'    = q̇ + q̈·dt
//! q'    = q + q̇'·dt
//! ```

use crate::adapter::{Dynamics, Kinematics, RobotDescription};
use crate::chain::SerialChain;
use crate::error::PhysicsError;
use crate::kinematics::ChainKinematics;
use crate::types::{FrameJacobian, FramePose, JointLimits, JointState};
use nalgebra::DVector;
use tracing::trace;

/// 串联机械臂仿真器
#[derive(Debug, Clone)]
pub struct ArmSimulator {
    chain: SerialChain,
    state: JointState,
    kinematics: ChainKinematics,
}

impl ArmSimulator {
    /// 在零位、零速度处创建仿真器
    pub fn new(chain: SerialChain) -> Result<Self, PhysicsError> {
        chain.validate()?;
        let state = JointState::zeros(chain.dof());
        let kinematics = ChainKinematics::compute(&chain, &state.positions)?;
        Ok(Self {
            chain,
            state,
            kinematics,
        })
    }

    /// 模型
    pub fn chain(&self) -> &SerialChain {
        &self.chain
    }

    /// 当前关节状态
    pub fn state(&self) -> &JointState {
        &self.state
    }

    /// 覆盖当前关节状态
    pub fn set_state(&mut self, state: JointState) -> Result<(), PhysicsError> {
        PhysicsError::check_dim("joint positions", self.chain.dof(), state.positions.len())?;
        PhysicsError::check_dim("joint velocities", self.chain.dof(), state.velocities.len())?;
        self.kinematics = ChainKinematics::compute(&self.chain, &state.positions)?;
        self.state = state;
        Ok(())
    }

    /// 只设置关节位置（速度保持不变）
    pub fn set_positions(&mut self, positions: DVector<f64>) -> Result<(), PhysicsError> {
        let velocities = self.state.velocities.clone();
        self.set_state(JointState {
            positions,
            velocities,
        })
    }

    /// 施加关节力矩并积分 `dt` 秒
    pub fn step(&mut self, torque: &DVector<f64>, dt: f64) -> Result<(), PhysicsError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidModel(format!("invalid time step {dt}")));
        }
        if !torque.iter().all(|t| t.is_finite()) {
            return Err(PhysicsError::NonFiniteState {
                what: "joint torques",
            });
        }

        let acceleration =
            self.chain
                .forward_dynamics(&self.state.positions, &self.state.velocities, torque)?;
        let velocities = &self.state.velocities + acceleration * dt;
        let positions = &self.state.positions + &velocities * dt;
        trace!(?positions, "simulator step");

        self.set_state(JointState {
            positions,
            velocities,
        })
    }
}

impl RobotDescription for ArmSimulator {
    fn joint_count(&self) -> usize {
        self.chain.dof()
    }

    fn joint_limits(&self) -> JointLimits {
        self.chain.joint_limits()
    }

    fn has_frame(&self, name: &str) -> bool {
        self.chain.site(name).is_ok()
    }
}

impl Kinematics for ArmSimulator {
    fn frame_pose(&self, frame: &str) -> Result<FramePose, PhysicsError> {
        self.kinematics.site_pose(&self.chain, frame)
    }

    fn frame_jacobian(&self, frame: &str) -> Result<FrameJacobian, PhysicsError> {
        self.kinematics.site_jacobian(&self.chain, frame)
    }
}

impl Dynamics for ArmSimulator {
    fn joint_positions(&self) -> &DVector<f64> {
        &self.state.positions
    }

    fn joint_velocities(&self) -> &DVector<f64> {
        &self.state.velocities
    }

    fn inverse_dynamics(&self, acceleration: &DVector<f64>) -> Result<DVector<f64>, PhysicsError> {
        self.chain
            .inverse_dynamics(&self.state.positions, &self.state.velocities, acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gravity_compensation_holds_still() {
        let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
        let start = DVector::from_vec(vec![0.1, 0.6, -0.2, -1.1, 0.3, 0.7, 0.0]);
        sim.set_positions(start.clone()).unwrap();

        for _ in 0..100 {
            let hold = sim.inverse_dynamics(&DVector::zeros(7)).unwrap();
            sim.step(&hold, 0.001).unwrap();
        }
        assert_relative_eq!(sim.state().positions, start, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_torque_falls() {
        let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
        sim.set_positions(DVector::from_vec(vec![0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0]))
            .unwrap();
        sim.step(&DVector::zeros(7), 0.001).unwrap();
        assert!(sim.state().velocities.norm() > 0.0);
    }

    #[test]
    fn test_rejects_bad_step() {
        let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
        assert!(sim.step(&DVector::zeros(7), 0.0).is_err());
        assert!(matches!(
            sim.step(&DVector::zeros(6), 0.001),
            Err(PhysicsError::DimensionMismatch { .. })
        ));
        let mut torque = DVector::zeros(7);
        torque[0] = f64::NAN;
        assert!(matches!(
            sim.step(&torque, 0.001),
            Err(PhysicsError::NonFiniteState { .. })
        ));
    }

    #[test]
    fn test_adapter_frames() {
        let sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
        assert!(sim.has_frame("peg_tip"));
        assert!(!sim.has_frame("camera"));
        assert_eq!(sim.joint_count(), 7);
        let jac = sim.frame_jacobian("peg_tip").unwrap();
        assert_eq!(jac.ncols(), 7);
    }
}
