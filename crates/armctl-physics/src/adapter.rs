//! 外部协作者接口
//!
//! 控制器只通过这些 trait 读取机器人状态。实现方可以是仿真器、
//! 真实硬件的状态镜像，或者测试用的 mock。
//!
//! # 线程安全
//!
//! trait 本身不要求 `Send` / `Sync`。控制循环单线程持有适配器，
//! 每个控制周期内同步调用。

use crate::error::PhysicsError;
use crate::types::{FrameJacobian, FramePose, JointLimits};
use nalgebra::DVector;

/// 机器人静态描述
pub trait RobotDescription {
    /// 关节数 N
    fn joint_count(&self) -> usize;

    /// 每个关节的位置限位
    fn joint_limits(&self) -> JointLimits;

    /// 是否存在命名参考坐标系
    fn has_frame(&self, name: &str) -> bool;
}

/// 运动学查询
pub trait Kinematics {
    /// 参考点当前位置与姿态（世界系）
    fn frame_pose(&self, frame: &str) -> Result<FramePose, PhysicsError>;

    /// 参考点当前雅可比（世界系，线速度 3×N + 角速度 3×N）
    fn frame_jacobian(&self, frame: &str) -> Result<FrameJacobian, PhysicsError>;
}

/// 动力学查询
pub trait Dynamics {
    /// 当前关节位置
    fn joint_positions(&self) -> &DVector<f64>;

    /// 当前关节速度
    fn joint_velocities(&self) -> &DVector<f64>;

    /// 逆动力学：在当前 `(q, q̇)` 下实现期望关节加速度所需的关节力矩
    ///
    /// 结果包含重力、科氏力/离心力和惯性项：
    ///
    /// ```text
    /// τ = M(q)·q̈ + C(q, q̇)·q̇ + g(q)
    /// ```
    ///
    /// 传入 `q̈ = 0` 即得到纯补偿力矩。
    fn inverse_dynamics(&self, acceleration: &DVector<f64>) -> Result<DVector<f64>, PhysicsError>;
}

/// 控制器需要的完整机器人接口
pub trait Robot: RobotDescription + Kinematics + Dynamics {}

impl<T: RobotDescription + Kinematics + Dynamics + ?Sized> Robot for T {}
