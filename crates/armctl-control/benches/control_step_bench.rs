//! 控制周期性能基准测试
//!
//! 单个控制周期（`torque` + 仿真步进）在 iiwa 14 参考模型上的耗时，
//! 以及旋转原语本身的开销。

use armctl_control::rotation::{integrate, quaternion_difference, rotation_matrix_to_quaternion};
use armctl_control::{
    ImpedanceConfig, ImpedanceController, InverseDynamicsConfig, InverseDynamicsController,
    TorqueController,
};
use armctl_physics::{ArmSimulator, Kinematics, SerialChain};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{DVector, UnitQuaternion, Vector3};

fn simulator() -> ArmSimulator {
    let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14()).unwrap();
    sim.set_positions(DVector::from_vec(vec![0.0, 0.5, 0.0, -1.2, 0.0, 0.6, 0.0]))
        .unwrap();
    sim
}

fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation");
    let q = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1);
    let m = q.to_rotation_matrix().into_inner();
    let dr = Vector3::new(0.01, -0.02, 0.005);

    group.bench_function("rotation_matrix_to_quaternion", |b| {
        b.iter(|| rotation_matrix_to_quaternion(black_box(&m)))
    });
    group.bench_function("quaternion_difference", |b| {
        let target = integrate(&q, &dr);
        b.iter(|| quaternion_difference(black_box(&target), black_box(&q)))
    });
    group.bench_function("integrate", |b| b.iter(|| integrate(black_box(&q), black_box(&dr))));
    group.finish();
}

fn bench_torque(c: &mut Criterion) {
    let mut group = c.benchmark_group("torque");
    let sim = simulator();

    let mut impedance = ImpedanceController::new(ImpedanceConfig::default(), &sim).unwrap();
    impedance.set_action(&[0.1, 0.0, -0.1, 0.0, 0.2, 0.0], &sim).unwrap();
    group.bench_function("impedance", |b| b.iter(|| impedance.torque(black_box(&sim))));

    let mut id = InverseDynamicsController::new(InverseDynamicsConfig::default(), &sim).unwrap();
    id.set_action(&[0.1, 0.6, 0.0, -1.0, 0.0, 0.5, 0.1], &sim).unwrap();
    group.bench_function("inverse_dynamics", |b| b.iter(|| id.torque(black_box(&sim))));
    group.finish();
}

fn bench_control_cycle(c: &mut Criterion) {
    c.bench_function("impedance_cycle_with_step", |b| {
        let mut sim = simulator();
        let mut ctrl = ImpedanceController::new(ImpedanceConfig::default(), &sim).unwrap();
        ctrl.reset(&sim).unwrap();
        b.iter(|| {
            let tau = ctrl.torque(&sim).unwrap();
            sim.step(&tau, 1e-3).unwrap();
            black_box(sim.frame_pose("peg_tip").unwrap());
        })
    });
}

criterion_group!(benches, bench_rotation, bench_torque, bench_control_cycle);
criterion_main!(benches);
