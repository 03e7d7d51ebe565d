//! TorqueController trait - 力矩控制器通用接口
//!
//! # 设计理念
//!
//! - **能力接口**: 各控制器是独立类型，只共享 `set_action` / `torque` /
//!   `action_space` 这组能力；按名称选择由 [`ControllerRegistry`](crate::ControllerRegistry) 完成
//! - **显式状态**: 机器人实时状态通过 [`Robot`] 适配器显式传入，控制器只持有
//!   设定点与增益
//! - **失败即上报**: 任何错误都原样返回，绝不以零力矩兜底
//!
//! # 调用顺序
//!
//! 每个控制周期：
//!
//! ```text
//! set_action(action, robot)   // 可选，更新设定点
//! torque(robot)               // 计算力矩，由调用方施加并推进仿真/硬件
//! ```
//!
//! # 线程安全
//!
//! 控制器不做内部加锁。多个线程共享同一实例时，由调用方串行化访问。

use crate::action_space::ActionSpace;
use crate::error::{ControlError, Result};
use armctl_physics::{PhysicsError, Robot};
use nalgebra::DVector;
use std::fmt::Debug;

/// 力矩控制器通用接口
pub trait TorqueController: Debug {
    /// 注册名
    fn name(&self) -> &'static str;

    /// 动作空间描述
    fn action_space(&self) -> &ActionSpace;

    /// 用动作更新设定点
    ///
    /// # 错误
    ///
    /// 维度不符、含 NaN、或适配器查询失败时返回错误，设定点保持不变。
    fn set_action(&mut self, action: &[f64], robot: &dyn Robot) -> Result<()>;

    /// 根据当前设定点与机器人实时状态计算关节力矩（N 维）
    fn torque(&self, robot: &dyn Robot) -> Result<DVector<f64>>;

    /// 把设定点重新锚定到机器人当前状态
    fn reset(&mut self, robot: &dyn Robot) -> Result<()>;
}

/// 校验动作维度与数值，返回动作向量
///
/// 若 `space` 给出且 `clip` 为真，按边界裁剪；否则越界只记录警告。
pub(crate) fn validate_action(
    controller: &'static str,
    action: &[f64],
    space: &ActionSpace,
    clip: bool,
) -> Result<DVector<f64>> {
    if action.len() != space.dim() {
        return Err(ControlError::InvalidActionDimension {
            expected: space.dim(),
            actual: action.len(),
        });
    }
    if !action.iter().all(|a| a.is_finite()) {
        return Err(ControlError::NonFiniteAction);
    }

    let action = DVector::from_column_slice(action);
    if space.contains(action.as_slice()) {
        return Ok(action);
    }
    if clip {
        tracing::debug!(controller, "action outside action space, clipping");
        Ok(space.clip(&action))
    } else {
        tracing::warn!(controller, ?action, "action outside advisory action space");
        Ok(action)
    }
}

/// 适配器返回的关节向量长度必须等于构造时确定的关节数
pub(crate) fn check_joint_dim(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(PhysicsError::DimensionMismatch {
            what,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}
