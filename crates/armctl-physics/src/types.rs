//! 适配器边界上传递的值类型

use nalgebra::{DVector, Matrix3, Matrix3xX, Matrix6xX, Vector3};

/// 参考点位姿（世界系）
#[derive(Debug, Clone, PartialEq)]
pub struct FramePose {
    /// 位置（m）
    pub position: Vector3<f64>,
    /// 姿态旋转矩阵
    pub rotation: Matrix3<f64>,
}

/// 参考点任务空间雅可比（世界系）
///
/// `linear` 把关节速度映射为参考点线速度，`angular` 映射为角速度。
#[derive(Debug, Clone, PartialEq)]
pub struct FrameJacobian {
    /// 线速度部分（3×N）
    pub linear: Matrix3xX<f64>,
    /// 角速度部分（3×N）
    pub angular: Matrix3xX<f64>,
}

impl FrameJacobian {
    /// 关节数 N
    pub fn ncols(&self) -> usize {
        self.linear.ncols()
    }

    /// 按 [线速度; 角速度] 顺序堆叠为 6×N 矩阵
    pub fn stacked(&self) -> Matrix6xX<f64> {
        let n = self.ncols();
        let mut j = Matrix6xX::zeros(n);
        j.fixed_rows_mut::<3>(0).copy_from(&self.linear);
        j.fixed_rows_mut::<3>(3).copy_from(&self.angular);
        j
    }
}

/// 关节位置限位
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointLimits {
    /// 下限（rad）
    pub low: DVector<f64>,
    /// 上限（rad）
    pub high: DVector<f64>,
}

impl JointLimits {
    /// 关节数
    pub fn len(&self) -> usize {
        self.low.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }
}

/// 关节状态（广义坐标 + 广义速度）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointState {
    /// 关节位置（rad）
    pub positions: DVector<f64>,
    /// 关节速度（rad/s）
    pub velocities: DVector<f64>,
}

impl JointState {
    /// 全零状态
    pub fn zeros(dof: usize) -> Self {
        Self {
            positions: DVector::zeros(dof),
            velocities: DVector::zeros(dof),
        }
    }

    /// 自由度
    pub fn dof(&self) -> usize {
        self.positions.len()
    }
}
