//! # armctl-control
//!
//! 机械臂力矩控制层：把高层"动作"（任务空间位移或关节目标）转换为关节力矩。
//!
//! ## 包含模块
//!
//! - `rotation` - 四元数旋转误差原语（矩阵转四元数、差分、积分）
//! - `controller` - [`TorqueController`] 能力接口
//! - `impedance` - 任务空间阻抗控制器
//! - `inverse_dynamics` - 关节空间 PD + 逆动力学（绝对 / 增量两个变体）
//! - `registry` - 按名称构造控制器
//! - `config` - TOML 控制器配置文件
//!
//! 运动学与动力学通过 [`armctl_physics::Robot`] 适配器查询，本 crate 不做任何
//! 模型计算。
//!
//! ## 使用示例
//!
//! ```no_run
//! use armctl_control::{ControllerFile, ControllerRegistry};
//! use armctl_physics::{ArmSimulator, SerialChain};
//!
//! let mut sim = ArmSimulator::new(SerialChain::kuka_iiwa14())?;
//! let file = ControllerFile::load_from_file("controller.toml")?;
//! let mut ctrl = file.build(&ControllerRegistry::with_builtin(), &sim)?;
//!
//! ctrl.reset(&sim)?;
//! for _ in 0..1000 {
//!     let tau = ctrl.torque(&sim)?;
//!     sim.step(&tau, 1e-3)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod action_space;
pub mod config;
pub mod controller;
pub mod error;
pub mod gains;
pub mod impedance;
pub mod inverse_dynamics;
pub mod registry;
pub mod rotation;

// 重新导出常用类型
pub use action_space::ActionSpace;
pub use config::{ControllerFile, ControllerSection};
pub use controller::TorqueController;
pub use error::{ControlError, Result};
pub use gains::{DerivativeGain, Gain};
pub use impedance::{ImpedanceConfig, ImpedanceController};
pub use inverse_dynamics::{
    InverseDynamicsConfig, InverseDynamicsController, JointPdLaw,
    RelativeInverseDynamicsController,
};
pub use registry::{ControllerFactory, ControllerRegistry};

/// 常用导入
pub mod prelude {
    pub use crate::{
        ActionSpace, ControlError, ControllerRegistry, ImpedanceController,
        InverseDynamicsController, RelativeInverseDynamicsController, TorqueController,
    };
    pub use armctl_physics::{Dynamics, Kinematics, Robot, RobotDescription};
}
