//! iiwa 14 参考模型的集成测试
//!
//! 雅可比与有限差分一致、逆/正动力学互逆等性质用 proptest 随机采样验证。

use approx::assert_relative_eq;
use armctl_physics::{ArmSimulator, Dynamics, Kinematics, RobotDescription, SerialChain};
use nalgebra::{DVector, Rotation3};
use proptest::prelude::*;

fn joint_vector() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.5..1.5f64, 7)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// 线速度雅可比与位置的有限差分一致
    #[test]
    fn linear_jacobian_matches_finite_difference(q in joint_vector()) {
        let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
        let q = DVector::from_vec(q);
        sim.set_positions(q.clone()).unwrap();
        let jac = sim.frame_jacobian("peg_tip").unwrap();
        let p0 = sim.frame_pose("peg_tip").unwrap().position;

        let h = 1e-7;
        for i in 0..7 {
            let mut dq = q.clone();
            dq[i] += h;
            sim.set_positions(dq).unwrap();
            let p1 = sim.frame_pose("peg_tip").unwrap().position;
            let numeric = (p1 - p0) / h;
            prop_assert!((numeric - jac.linear.column(i)).norm() < 1e-5);
        }
    }

    /// 角速度雅可比与姿态的有限差分一致（世界系）
    #[test]
    fn angular_jacobian_matches_finite_difference(q in joint_vector()) {
        let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
        let q = DVector::from_vec(q);
        sim.set_positions(q.clone()).unwrap();
        let jac = sim.frame_jacobian("peg_tip").unwrap();
        let r0 = Rotation3::from_matrix_unchecked(sim.frame_pose("peg_tip").unwrap().rotation);

        let h = 1e-7;
        for i in 0..7 {
            let mut dq = q.clone();
            dq[i] += h;
            sim.set_positions(dq).unwrap();
            let r1 = Rotation3::from_matrix_unchecked(sim.frame_pose("peg_tip").unwrap().rotation);
            // 世界系增量：R1 = exp(ω·h) R0
            let numeric = (r1 * r0.inverse()).scaled_axis() / h;
            prop_assert!((numeric - jac.angular.column(i)).norm() < 1e-5);
        }
    }

    /// 正动力学是逆动力学的逆
    #[test]
    fn forward_dynamics_inverts_inverse_dynamics(
        q in joint_vector(),
        qd in prop::collection::vec(-1.0..1.0f64, 7),
        qdd in prop::collection::vec(-5.0..5.0f64, 7),
    ) {
        let chain = SerialChain::kuka_iiwa14();
        let q = DVector::from_vec(q);
        let qd = DVector::from_vec(qd);
        let qdd = DVector::from_vec(qdd);
        let tau = chain.inverse_dynamics(&q, &qd, &qdd).unwrap();
        let recovered = chain.forward_dynamics(&q, &qd, &tau).unwrap();
        prop_assert!((recovered - qdd).norm() < 1e-7);
    }
}

#[test]
fn test_simulator_inverse_dynamics_uses_live_state() {
    let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
    let zero = DVector::zeros(7);
    let upright = sim.inverse_dynamics(&zero).unwrap();
    // 竖直零位时第一关节轴沿重力方向，不承受重力矩
    assert_relative_eq!(upright[0], 0.0, epsilon = 1e-9);

    sim.set_positions(DVector::from_vec(vec![0.0, 1.2, 0.0, 0.0, 0.0, 0.0, 0.0]))
        .unwrap();
    let bent = sim.inverse_dynamics(&zero).unwrap();
    assert!(bent[1].abs() > upright[1].abs());
}

#[test]
fn test_no_gravity_model_needs_no_holding_torque() {
    let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14().without_gravity()).unwrap();
    sim.set_positions(DVector::from_vec(vec![0.3, 1.0, -0.5, -1.0, 0.2, 0.4, 0.1]))
        .unwrap();
    let tau = sim.inverse_dynamics(&DVector::zeros(7)).unwrap();
    assert_relative_eq!(tau, DVector::zeros(7), epsilon = 1e-12);
}

#[test]
fn test_joint_limits_cover_iiwa_ranges() {
    let sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
    let limits = sim.joint_limits();
    assert_eq!(limits.len(), 7);
    assert_relative_eq!(limits.high[0], 170f64.to_radians());
    assert_relative_eq!(limits.low[6], -175f64.to_radians());
}
