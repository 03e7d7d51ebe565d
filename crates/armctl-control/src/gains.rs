//! 控制增益
//!
//! 增益可以是标量（所有关节相同）或逐关节向量。微分增益额外支持
//! `"auto"`：按临界阻尼启发式 `kd = 2·sqrt(kp)` 自动推导。
//!
//! TOML 写法：
//!
//! ```toml
//! kp = 100.0                 # 标量
//! kd = "auto"                # 自动
//! # kp = [100, 100, 80, 80, 50, 50, 30]   # 逐关节
//! ```

use crate::error::{ControlError, Result};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// 标量或逐关节增益
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gain {
    /// 所有维度相同
    Scalar(f64),
    /// 逐维度
    PerJoint(Vec<f64>),
}

impl Default for Gain {
    fn default() -> Self {
        Gain::Scalar(0.0)
    }
}

impl From<f64> for Gain {
    fn from(value: f64) -> Self {
        Gain::Scalar(value)
    }
}

impl From<Vec<f64>> for Gain {
    fn from(values: Vec<f64>) -> Self {
        Gain::PerJoint(values)
    }
}

impl Gain {
    /// 展开为 `dim` 维向量，并检查非负、有限
    pub fn resolve(&self, name: &str, dim: usize) -> Result<DVector<f64>> {
        let values = match self {
            Gain::Scalar(value) => DVector::from_element(dim, *value),
            Gain::PerJoint(values) => {
                if values.len() != dim {
                    return Err(ControlError::InvalidGain(format!(
                        "{name} has {} entries, expected {dim}",
                        values.len()
                    )));
                }
                DVector::from_column_slice(values)
            },
        };
        if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(ControlError::InvalidGain(format!(
                "{name} must be finite and non-negative, got {bad}"
            )));
        }
        Ok(values)
    }
}

/// 微分增益：显式给定或按 `kp` 自动推导
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DerivativeGainRepr", into = "DerivativeGainRepr")]
pub enum DerivativeGain {
    /// `kd = 2·sqrt(kp)`
    #[default]
    Auto,
    /// 显式增益
    Explicit(Gain),
}

impl DerivativeGain {
    /// 结合已展开的 `kp` 得到 `kd` 向量
    pub fn resolve(&self, kp: &DVector<f64>) -> Result<DVector<f64>> {
        match self {
            DerivativeGain::Auto => Ok(kp.map(|k| 2.0 * k.sqrt())),
            DerivativeGain::Explicit(gain) => gain.resolve("kd", kp.len()),
        }
    }
}

impl From<f64> for DerivativeGain {
    fn from(value: f64) -> Self {
        DerivativeGain::Explicit(Gain::Scalar(value))
    }
}

/// 序列化表示：`"auto"`、标量或数组
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DerivativeGainRepr {
    Keyword(String),
    Gain(Gain),
}

impl TryFrom<DerivativeGainRepr> for DerivativeGain {
    type Error = String;

    fn try_from(repr: DerivativeGainRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            DerivativeGainRepr::Keyword(word) if word == "auto" => Ok(DerivativeGain::Auto),
            DerivativeGainRepr::Keyword(word) => {
                Err(format!("expected \"auto\" or a number for kd, got \"{word}\""))
            },
            DerivativeGainRepr::Gain(gain) => Ok(DerivativeGain::Explicit(gain)),
        }
    }
}

impl From<DerivativeGain> for DerivativeGainRepr {
    fn from(gain: DerivativeGain) -> Self {
        match gain {
            DerivativeGain::Auto => DerivativeGainRepr::Keyword("auto".to_string()),
            DerivativeGain::Explicit(gain) => DerivativeGainRepr::Gain(gain),
        }
    }
}
