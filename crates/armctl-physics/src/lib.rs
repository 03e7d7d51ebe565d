//! # armctl-physics
//!
//! 机械臂力矩控制层的"外部协作者"边界。
//!
//! 控制器本身不做正运动学、雅可比或逆动力学计算，而是通过本 crate 定义的
//! trait 向外部物理/动力学引擎查询：
//!
//! - [`RobotDescription`]: 关节数、关节限位、命名参考坐标系
//! - [`Kinematics`]: 参考点位姿与任务空间雅可比（线速度行 + 角速度行）
//! - [`Dynamics`]: 当前关节状态与逆动力学求解
//! - [`Robot`]: 以上三者的组合（blanket impl）
//!
//! 另外提供一个纯 Rust 的参考实现：
//!
//! - [`SerialChain`]: 串联旋转关节刚体模型（FK、几何雅可比、RNEA、质量矩阵）
//! - [`ArmSimulator`]: 持有模型与关节状态，实现 [`Robot`]，支持半隐式欧拉步进
//! - [`SerialChain::kuka_iiwa14`]: 7 自由度 KUKA LBR iiwa 14 预设
//! - [`ModelDynamics`]: 状态取自被控对象、逆动力学换用独立控制模型的适配器
//!
//! # 坐标约定
//!
//! - 所有位姿、雅可比均在世界坐标系表达
//! - 雅可比角速度行与世界系角速度一致：`ω = J_rot · q̇`
//! - 重力向量默认 `(0, 0, -9.81)`

mod adapter;
mod chain;
mod dynamics;
mod error;
mod kinematics;
mod model_dynamics;
mod presets;
mod simulator;
mod types;

pub use adapter::{Dynamics, Kinematics, Robot, RobotDescription};
pub use chain::{Link, RevoluteJoint, SerialChain, Site};
pub use error::PhysicsError;
pub use kinematics::ChainKinematics;
pub use model_dynamics::ModelDynamics;
pub use simulator::ArmSimulator;
pub use types::{FrameJacobian, FramePose, JointLimits, JointState};

/// 标准重力加速度（m/s²）
pub const STANDARD_GRAVITY: f64 = 9.81;
