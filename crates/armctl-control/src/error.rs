//! 控制层错误类型
//!
//! 错误分为三类：
//!
//! - **调用方输入错误**（invalid argument）：动作维度不符、动作含 NaN。
//!   此时设定点保持不变。
//! - **配置 / 注册错误**：增益非法、重复注册、未知控制器名、TOML 解析失败。
//! - **适配器错误**：运动学/动力学求解失败，原样透传 [`PhysicsError`]。
//!
//! 任何错误都不会被替换成默认力矩，一律交给控制循环处理。

use armctl_physics::PhysicsError;
use thiserror::Error;

/// 控制器错误
#[derive(Debug, Error)]
pub enum ControlError {
    // ==================== Invalid Argument ====================
    /// 动作维度与控制器期望不符
    #[error("Invalid action dimension: expected {expected}, got {actual}")]
    InvalidActionDimension {
        /// 期望维度
        expected: usize,
        /// 实际维度
        actual: usize,
    },

    /// 动作包含 NaN 或无穷大
    #[error("Action contains non-finite values")]
    NonFiniteAction,

    // ==================== Rotation ====================
    /// 旋转矩阵退化（行列式过小或为负）
    #[error("Degenerate rotation matrix (determinant {determinant:.3e})")]
    DegenerateRotation {
        /// 行列式
        determinant: f64,
    },

    /// 旋转矩阵包含 NaN 或无穷大
    #[error("Rotation matrix contains non-finite values")]
    NonFiniteRotation,

    // ==================== Configuration ====================
    /// 增益非法
    #[error("Invalid gain: {0}")]
    InvalidGain(String),

    /// 配置非法
    #[error("Invalid controller config: {0}")]
    InvalidConfig(String),

    /// 控制器名已被注册
    #[error("Controller already registered: {0}")]
    DuplicateController(String),

    /// 控制器名未注册
    #[error("Unknown controller: {0}")]
    UnknownController(String),

    /// TOML 解析错误
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// 配置文件读取错误
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Adapter ====================
    /// 运动学 / 动力学适配器错误
    #[error("Physics adapter error: {0}")]
    Physics(#[from] PhysicsError),
}

impl ControlError {
    /// 是否为调用方输入错误（设定点未被修改）
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ControlError::InvalidActionDimension { .. } | ControlError::NonFiniteAction
        )
    }
}

/// 控制层 Result 别名
pub type Result<T> = std::result::Result<T, ControlError>;
