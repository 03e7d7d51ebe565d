//! 在 iiwa 14 参考模型上闭环运行控制器

use armctl_control::{
    ControllerFile, ControllerRegistry, ImpedanceConfig, ImpedanceController,
    InverseDynamicsConfig, InverseDynamicsController, TorqueController,
};
use armctl_physics::{ArmSimulator, Dynamics, JointState, Kinematics, ModelDynamics, SerialChain};
use nalgebra::DVector;

const DT: f64 = 1e-3;

fn simulator() -> ArmSimulator {
    let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
    sim.set_positions(DVector::from_vec(vec![0.0, 0.5, 0.0, -1.2, 0.0, 0.6, 0.0]))
        .unwrap();
    sim
}

fn run(ctrl: &dyn TorqueController, sim: &mut ArmSimulator, steps: usize) {
    for _ in 0..steps {
        let tau = ctrl.torque(&*sim).unwrap();
        sim.step(&tau, DT).unwrap();
    }
}

#[test]
fn inverse_dynamics_converges_to_target() {
    let mut sim = simulator();
    let mut ctrl =
        InverseDynamicsController::new(InverseDynamicsConfig::default(), &sim).unwrap();
    let target = vec![0.3, 0.7, -0.2, -1.0, 0.1, 0.4, 0.2];
    ctrl.set_action(&target, &sim).unwrap();

    run(&ctrl, &mut sim, 3000);
    let error = DVector::from_vec(target) - sim.joint_positions();
    assert!(error.amax() < 1e-3, "residual error {error}");
}

#[test]
fn impedance_holds_pose_after_reset() {
    let mut sim = simulator();
    let config = ImpedanceConfig {
        stiffness: [200.0, 200.0, 200.0, 20.0, 20.0, 20.0],
        damping: 5.0.into(),
        ..Default::default()
    };
    let mut ctrl = ImpedanceController::new(config, &sim).unwrap();
    ctrl.reset(&sim).unwrap();

    let start = sim.frame_pose("peg_tip").unwrap().position;
    run(&ctrl, &mut sim, 500);
    let end = sim.frame_pose("peg_tip").unwrap().position;
    assert!((end - start).norm() < 1e-6);
}

#[test]
fn impedance_moves_toward_setpoint() {
    let mut sim = simulator();
    let config = ImpedanceConfig {
        stiffness: [300.0, 300.0, 300.0, 30.0, 30.0, 30.0],
        damping: 10.0.into(),
        ..Default::default()
    };
    let mut ctrl = ImpedanceController::new(config, &sim).unwrap();
    // 沿 x 方向移动 2 cm
    ctrl.set_action(&[0.2, 0.0, 0.0, 0.0, 0.0, 0.0], &sim).unwrap();
    let initial = ctrl.pose_error(&sim).unwrap().norm();

    run(&ctrl, &mut sim, 2000);
    let remaining = ctrl.pose_error(&sim).unwrap().norm();
    assert!(remaining < 0.5 * initial, "{remaining} vs {initial}");
}

#[test]
fn controller_from_config_text() {
    let file = ControllerFile::from_toml_str(
        r#"
[controller]
type = "RelativeInverseDynamicsController"
kp = [100, 100, 100, 100, 50, 50, 50]
kd = "auto"
"#,
    )
    .unwrap();
    let sim = simulator();
    let ctrl = file.build(&ControllerRegistry::with_builtin(), &sim).unwrap();
    assert_eq!(ctrl.name(), "RelativeInverseDynamicsController");
    assert_eq!(ctrl.action_space().dim(), 7);
}

#[test]
fn impedance_with_gravity_free_control_model() {
    let mut sim = simulator();
    sim.set_state(JointState {
        positions: DVector::from_vec(vec![0.1, 0.5, -0.2, -1.2, 0.3, 0.8, 0.0]),
        velocities: DVector::from_vec(vec![0.2, -0.1, 0.3, 0.1, -0.2, 0.4, 0.1]),
    })
    .unwrap();
    let model = SerialChain::kuka_iiwa14().without_gravity();
    let robot = ModelDynamics::new(&model, &sim).unwrap();

    let config = ImpedanceConfig {
        stiffness: [200.0, 200.0, 200.0, 20.0, 20.0, 20.0],
        damping: 4.0.into(),
        ..Default::default()
    };
    let mut ctrl = ImpedanceController::new(config, &robot).unwrap();
    ctrl.set_action(&[0.2, -0.1, 0.3, 0.1, 0.2, -0.3], &robot).unwrap();
    let tau = ctrl.torque(&robot).unwrap();

    // τ = Jᵀ(K⊙e) + M(q)·(−D⊙q̇) + C(q, q̇)·q̇，不含重力项
    let q = &sim.state().positions;
    let qd = &sim.state().velocities;
    let wrench = ctrl.stiffness().component_mul(&ctrl.pose_error(&robot).unwrap());
    let spring = sim.frame_jacobian("peg_tip").unwrap().stacked().transpose() * wrench;
    let damping = model.mass_matrix(q).unwrap() * (-ctrl.damping().component_mul(qd));
    let coriolis = model.bias_forces(q, qd).unwrap();
    let expected = spring + damping + coriolis;
    assert!((&tau - &expected).amax() < 1e-9, "torque {tau} expected {expected}");

    // 换成带重力的被控对象本身，力矩恰好多出重力项
    let gravity = sim.chain().bias_forces(q, &DVector::zeros(7)).unwrap();
    let with_gravity = ctrl.torque(&sim).unwrap();
    assert!((with_gravity - &tau - gravity).amax() < 1e-9);
}
