//! 旋转误差原语
//!
//! 姿态一律用单位四元数（nalgebra `UnitQuaternion`，内部 `w` 为标量部分）。
//!
//! # 约定
//!
//! - **世界系增量**：`integrate(q, dr) = exp(dr) ⊗ q`，`dr` 是世界系旋转向量，
//!   与 [`FrameJacobian::angular`](armctl_physics::FrameJacobian) 的坐标系一致
//! - **误差方向**：`quaternion_difference(target, current) = log(target ⊗ current⁻¹)`，
//!   把它作为小旋转施加到 `current` 上会使其靠近 `target`
//! - **双覆盖**：取标量部分非负的代表元，保证误差角 ∈ [0, π]
//!
//! 因此对 `|dr| < π` 有精确往返：
//!
//! ```text
//! quaternion_difference(integrate(q, dr), q) == dr
//! ```

use crate::error::ControlError;
use nalgebra::{Matrix3, Quaternion, Rotation3, UnitQuaternion, Vector3};
use tracing::warn;

/// 旋转矩阵行列式下限，低于此值视为不可恢复
const MIN_DETERMINANT: f64 = 1e-6;

/// 正交性误差上限，超过时先投影到最近的旋转矩阵
const ORTHOGONALITY_TOLERANCE: f64 = 1e-9;

/// 小角度阈值，低于此值用一阶近似避免除零
const SMALL_ANGLE: f64 = 1e-12;

/// 无旋转
pub fn identity() -> UnitQuaternion<f64> {
    UnitQuaternion::identity()
}

/// 旋转矩阵转单位四元数
///
/// 输入允许有浮点累积误差：若 `RᵀR` 偏离单位阵，先通过 SVD 投影到最近的
/// 旋转矩阵（`U·Vᵀ`），再转换并归一化。输出标量部分非负。
///
/// # 错误
///
/// - [`ControlError::NonFiniteRotation`]: 含 NaN / 无穷大
/// - [`ControlError::DegenerateRotation`]: 行列式接近零或为负（含镜像）
pub fn rotation_matrix_to_quaternion(m: &Matrix3<f64>) -> Result<UnitQuaternion<f64>, ControlError> {
    if !m.iter().all(|v| v.is_finite()) {
        return Err(ControlError::NonFiniteRotation);
    }
    let determinant = m.determinant();
    if determinant < MIN_DETERMINANT {
        return Err(ControlError::DegenerateRotation { determinant });
    }

    let orthogonality_error = (m.transpose() * m - Matrix3::identity()).norm();
    let rotation = if orthogonality_error > ORTHOGONALITY_TOLERANCE {
        warn!(
            orthogonality_error,
            "rotation matrix is not orthonormal, projecting onto SO(3)"
        );
        let svd = m.svd(true, true);
        match (svd.u, svd.v_t) {
            (Some(u), Some(v_t)) => u * v_t,
            _ => return Err(ControlError::DegenerateRotation { determinant }),
        }
    } else {
        *m
    };

    let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
    Ok(canonical(UnitQuaternion::new_normalize(q.into_inner())))
}

/// 从 `current` 指向 `target` 的世界系旋转向量（轴 × 角）
pub fn quaternion_difference(
    target: &UnitQuaternion<f64>,
    current: &UnitQuaternion<f64>,
) -> Vector3<f64> {
    let delta = canonical(target * current.inverse());
    let imag = delta.imag();
    let sin_half = imag.norm();
    if sin_half < SMALL_ANGLE {
        // sin(θ/2) ≈ θ/2
        return imag * 2.0;
    }
    let angle = 2.0 * f64::atan2(sin_half, delta.w);
    imag * (angle / sin_half)
}

/// 以世界系旋转向量 `dr` 推进姿态，结果重新归一化
pub fn integrate(q: &UnitQuaternion<f64>, dr: &Vector3<f64>) -> UnitQuaternion<f64> {
    let step = UnitQuaternion::from_scaled_axis(*dr);
    UnitQuaternion::new_normalize((step * q).into_inner())
}

/// 选取标量部分非负的代表元
fn canonical(q: UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    if q.w < 0.0 {
        let flipped: Quaternion<f64> = -q.into_inner();
        UnitQuaternion::new_unchecked(flipped)
    } else {
        q
    }
}
