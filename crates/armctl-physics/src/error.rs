//! 物理层错误类型

use thiserror::Error;

/// 运动学/动力学适配器错误
///
/// 控制器不会吞掉这些错误：它们原样传递给控制循环。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// 请求了模型中不存在的参考坐标系
    #[error("Unknown reference frame: {name}")]
    UnknownFrame {
        /// 坐标系名称
        name: String,
    },

    /// 向量维度与关节数不匹配
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// 出错的量
        what: &'static str,
        /// 期望维度
        expected: usize,
        /// 实际维度
        actual: usize,
    },

    /// 质量矩阵不可分解（非正定）
    #[error("Mass matrix is not positive definite")]
    SingularMassMatrix,

    /// 状态或输入包含 NaN / 无穷大
    #[error("Non-finite value in {what}")]
    NonFiniteState {
        /// 出错的量
        what: &'static str,
    },

    /// 模型描述无效
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl PhysicsError {
    /// 检查向量维度
    pub(crate) fn check_dim(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected != actual {
            return Err(PhysicsError::DimensionMismatch {
                what,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
