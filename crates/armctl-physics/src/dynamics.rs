//! 刚体动力学：递归牛顿-欧拉（RNEA）逆动力学
//!
//! # 算法
//!
//! 世界系下的三维向量形式。基座加速度取 `-g`，重力由此统一进入递推。
//!
//! 前向（基座 → 末端）：
//!
//! ```text
//! ω_i   = ω_{i-1} + z_i q̇_i
//! α_i   = α_{i-1} + z_i q̈_i + ω_{i-1} × z_i q̇_i
//! a_o,i = a_o,i-1 + α_{i-1} × r + ω_{i-1} × (ω_{i-1} × r)      r = o_i - o_{i-1}
//! a_c,i = a_o,i   + α_i × d     + ω_i × (ω_i × d)              d = c_i - o_i
//! ```
//!
//! 反向（末端 → 基座）：
//!
//! ```text
//! f_i = m_i a_c,i + f_{i+1}
//! n_i = I_i α_i + ω_i × I_i ω_i + d × m_i a_c,i + n_{i+1} + (o_{i+1} - o_i) × f_{i+1}
//! τ_i = z_i · n_i
//! ```
//!
//! 质量矩阵按列由 `RNEA(q, 0, e_j)`（无重力）得到，前向动力学解
//! `M q̈ = τ - h(q, q̇)`。

use crate::chain::SerialChain;
use crate::error::PhysicsError;
use crate::kinematics::ChainKinematics;
use nalgebra::{DMatrix, DVector, Vector3};

impl SerialChain {
    /// 逆动力学：`τ = M(q) q̈ + C(q, q̇) q̇ + g(q)`
    pub fn inverse_dynamics(
        &self,
        q: &DVector<f64>,
        qd: &DVector<f64>,
        qdd: &DVector<f64>,
    ) -> Result<DVector<f64>, PhysicsError> {
        let kin = ChainKinematics::compute(self, q)?;
        self.rnea(&kin, qd, qdd, &self.gravity)
    }

    /// 偏置力 `h(q, q̇) = C(q, q̇) q̇ + g(q)`
    pub fn bias_forces(
        &self,
        q: &DVector<f64>,
        qd: &DVector<f64>,
    ) -> Result<DVector<f64>, PhysicsError> {
        self.inverse_dynamics(q, qd, &DVector::zeros(self.dof()))
    }

    /// 关节空间质量矩阵 `M(q)`
    pub fn mass_matrix(&self, q: &DVector<f64>) -> Result<DMatrix<f64>, PhysicsError> {
        let kin = ChainKinematics::compute(self, q)?;
        let n = self.dof();
        let zero = DVector::zeros(n);
        let mut mass = DMatrix::zeros(n, n);
        for j in 0..n {
            let mut unit = DVector::zeros(n);
            unit[j] = 1.0;
            let column = self.rnea(&kin, &zero, &unit, &Vector3::zeros())?;
            mass.set_column(j, &column);
        }
        // 消除数值误差带来的微小不对称
        Ok((&mass + mass.transpose()) * 0.5)
    }

    /// 前向动力学：`q̈ = M(q)⁻¹ (τ - h(q, q̇))`
    pub fn forward_dynamics(
        &self,
        q: &DVector<f64>,
        qd: &DVector<f64>,
        torque: &DVector<f64>,
    ) -> Result<DVector<f64>, PhysicsError> {
        PhysicsError::check_dim("joint torques", self.dof(), torque.len())?;
        let rhs = torque - self.bias_forces(q, qd)?;
        let cholesky = self
            .mass_matrix(q)?
            .cholesky()
            .ok_or(PhysicsError::SingularMassMatrix)?;
        Ok(cholesky.solve(&rhs))
    }

    fn rnea(
        &self,
        kin: &ChainKinematics,
        qd: &DVector<f64>,
        qdd: &DVector<f64>,
        gravity: &Vector3<f64>,
    ) -> Result<DVector<f64>, PhysicsError> {
        let n = self.dof();
        PhysicsError::check_dim("joint velocities", n, qd.len())?;
        PhysicsError::check_dim("joint accelerations", n, qdd.len())?;
        if !qd.iter().chain(qdd.iter()).all(|v| v.is_finite()) {
            return Err(PhysicsError::NonFiniteState {
                what: "joint velocities/accelerations",
            });
        }

        let mut omega = vec![Vector3::zeros(); n];
        let mut alpha = vec![Vector3::zeros(); n];
        let mut com_acc = vec![Vector3::zeros(); n];
        let mut com_offset = vec![Vector3::zeros(); n];

        // 基座：固定，线加速度 = -g
        let mut prev_omega = Vector3::zeros();
        let mut prev_alpha = Vector3::zeros();
        let mut prev_origin = Vector3::zeros();
        let mut prev_origin_acc = -gravity;

        for i in 0..n {
            let z = kin.joint_axis(i);
            let origin = kin.joint_origin(i);

            let r = origin - prev_origin;
            let origin_acc = prev_origin_acc
                + prev_alpha.cross(&r)
                + prev_omega.cross(&prev_omega.cross(&r));

            let joint_rate = z * qd[i];
            omega[i] = prev_omega + joint_rate;
            alpha[i] = prev_alpha + z * qdd[i] + prev_omega.cross(&joint_rate);

            let link_pose = kin.link_pose(i);
            let com = link_pose * nalgebra::Point3::from(self.links[i].com);
            let d = com.coords - origin;
            com_acc[i] = origin_acc + alpha[i].cross(&d) + omega[i].cross(&omega[i].cross(&d));
            com_offset[i] = d;

            prev_omega = omega[i];
            prev_alpha = alpha[i];
            prev_origin = *origin;
            prev_origin_acc = origin_acc;
        }

        let mut torque = DVector::zeros(n);
        let mut child_force = Vector3::zeros();
        let mut child_moment = Vector3::zeros();
        let mut child_origin = Vector3::zeros();

        for i in (0..n).rev() {
            let link = &self.links[i];
            let rotation = kin.link_pose(i).rotation.to_rotation_matrix();
            let inertia = rotation.matrix() * link.inertia * rotation.matrix().transpose();
            let origin = kin.joint_origin(i);

            let inertial_force = com_acc[i] * link.mass;
            let inertial_moment = inertia * alpha[i] + omega[i].cross(&(inertia * omega[i]));

            let mut force = inertial_force;
            let mut moment = inertial_moment + com_offset[i].cross(&inertial_force);
            if i + 1 < n {
                force += child_force;
                moment += child_moment + (child_origin - origin).cross(&child_force);
            }

            torque[i] = kin.joint_axis(i).dot(&moment);

            child_force = force;
            child_moment = moment;
            child_origin = *origin;
        }

        Ok(torque)
    }
}
