//! 正运动学与几何雅可比
//!
//! # 算法
//!
//! 从基座沿链递推：
//!
//! ```text
//! T_joint(i) = T_link(i-1) · origin(i)
//! z(i)       = R_joint(i) · axis(i)            // 世界系关节轴
//! o(i)       = p_joint(i)                      // 世界系关节原点
//! T_link(i)  = T_joint(i) · Rot(axis(i), q_i)
//! ```
//!
//! 参考点 `p` 的雅可比第 `i` 列：
//!
//! ```text
//! J_lin(:, i) = z(i) × (p - o(i))
//! J_rot(:, i) = z(i)
//! ```
//!
//! 位于参考点所属连杆之后的关节对应列为零。

use crate::chain::SerialChain;
use crate::error::PhysicsError;
use crate::types::{FrameJacobian, FramePose};
use nalgebra::{DVector, Isometry3, Matrix3xX, Translation3, UnitQuaternion, Vector3};

/// 一组关节位置下的正运动学结果
#[derive(Debug, Clone)]
pub struct ChainKinematics {
    link_poses: Vec<Isometry3<f64>>,
    joint_origins: Vec<Vector3<f64>>,
    joint_axes: Vec<Vector3<f64>>,
}

impl ChainKinematics {
    /// 计算所有连杆的世界位姿
    pub fn compute(chain: &SerialChain, q: &DVector<f64>) -> Result<Self, PhysicsError> {
        PhysicsError::check_dim("joint positions", chain.dof(), q.len())?;
        if !q.iter().all(|v| v.is_finite()) {
            return Err(PhysicsError::NonFiniteState {
                what: "joint positions",
            });
        }

        let n = chain.dof();
        let mut link_poses = Vec::with_capacity(n);
        let mut joint_origins = Vec::with_capacity(n);
        let mut joint_axes = Vec::with_capacity(n);

        let mut parent = Isometry3::identity();
        for (joint, &angle) in chain.joints.iter().zip(q.iter()) {
            let joint_frame = parent * joint.origin;
            joint_axes.push(joint_frame.rotation * joint.axis.into_inner());
            joint_origins.push(joint_frame.translation.vector);

            let rotation = UnitQuaternion::from_axis_angle(&joint.axis, angle);
            let link = joint_frame * Isometry3::from_parts(Translation3::identity(), rotation);
            link_poses.push(link);
            parent = link;
        }

        Ok(Self {
            link_poses,
            joint_origins,
            joint_axes,
        })
    }

    /// 连杆 `i` 的世界位姿
    pub fn link_pose(&self, i: usize) -> &Isometry3<f64> {
        &self.link_poses[i]
    }

    /// 关节 `i` 的世界系原点
    pub fn joint_origin(&self, i: usize) -> &Vector3<f64> {
        &self.joint_origins[i]
    }

    /// 关节 `i` 的世界系单位轴
    pub fn joint_axis(&self, i: usize) -> &Vector3<f64> {
        &self.joint_axes[i]
    }

    /// 命名参考点的世界位姿
    pub fn site_pose(&self, chain: &SerialChain, name: &str) -> Result<FramePose, PhysicsError> {
        let iso = self.site_isometry(chain, name)?;
        Ok(FramePose {
            position: iso.translation.vector,
            rotation: iso.rotation.to_rotation_matrix().into_inner(),
        })
    }

    /// 命名参考点的世界系几何雅可比
    pub fn site_jacobian(
        &self,
        chain: &SerialChain,
        name: &str,
    ) -> Result<FrameJacobian, PhysicsError> {
        let site = chain.site(name)?;
        let p = self.site_isometry(chain, name)?.translation.vector;

        let n = chain.dof();
        let mut linear = Matrix3xX::zeros(n);
        let mut angular = Matrix3xX::zeros(n);
        for i in 0..=site.link {
            let z = &self.joint_axes[i];
            linear.set_column(i, &z.cross(&(p - self.joint_origins[i])));
            angular.set_column(i, z);
        }
        Ok(FrameJacobian { linear, angular })
    }

    fn site_isometry(&self, chain: &SerialChain, name: &str) -> Result<Isometry3<f64>, PhysicsError> {
        let site = chain.site(name)?;
        Ok(self.link_poses[site.link] * site.offset)
    }
}
