//! 动作空间描述
//!
//! 纯元数据：描述 `set_action` 的有效输入域。默认只做提示，
//! 控制器配置 `clip_actions = true` 时才会按此裁剪。

use armctl_physics::JointLimits;
use nalgebra::DVector;

/// 盒型动作空间 `[low, high]`
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpace {
    /// 下界（可为 `-∞`）
    pub low: DVector<f64>,
    /// 上界（可为 `+∞`）
    pub high: DVector<f64>,
}

impl ActionSpace {
    /// 无界空间
    pub fn unbounded(dim: usize) -> Self {
        Self {
            low: DVector::from_element(dim, f64::NEG_INFINITY),
            high: DVector::from_element(dim, f64::INFINITY),
        }
    }

    /// 以关节限位为界
    pub fn from_joint_limits(limits: &JointLimits) -> Self {
        Self {
            low: limits.low.clone(),
            high: limits.high.clone(),
        }
    }

    /// 维度
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// 是否每一维都有有限边界
    pub fn is_bounded(&self) -> bool {
        self.low.iter().chain(self.high.iter()).all(|b| b.is_finite())
    }

    /// 动作是否落在空间内（维度不符视为不在）
    pub fn contains(&self, action: &[f64]) -> bool {
        action.len() == self.dim()
            && action
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(a, (lo, hi))| a >= lo && a <= hi)
    }

    /// 逐维裁剪到边界内
    pub fn clip(&self, action: &DVector<f64>) -> DVector<f64> {
        action.zip_zip_map(&self.low, &self.high, |a, lo, hi| a.clamp(lo, hi))
    }
}
