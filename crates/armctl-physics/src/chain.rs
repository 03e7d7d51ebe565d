//! 串联旋转关节模型描述
//!
//! 模型按 URDF 的习惯描述：每个关节给出相对父连杆坐标系的固定变换
//! （平移 + RPY）与关节轴，连杆给出质量、质心和质心处惯量。

use crate::error::PhysicsError;
use crate::types::JointLimits;
use nalgebra::{DVector, Isometry3, Matrix3, Translation3, Unit, UnitQuaternion, Vector3};

/// 旋转关节
#[derive(Debug, Clone)]
pub struct RevoluteJoint {
    /// 关节名称
    pub name: String,
    /// 父连杆坐标系到关节坐标系的固定变换
    pub origin: Isometry3<f64>,
    /// 关节轴（关节坐标系下）
    pub axis: Unit<Vector3<f64>>,
    /// 位置下限（rad）
    pub lower: f64,
    /// 位置上限（rad）
    pub upper: f64,
}

impl RevoluteJoint {
    /// 创建绕 z 轴旋转的关节，限位默认 [-π, π]
    ///
    /// `xyz` 与 `rpy` 与 URDF `<origin>` 的含义一致。
    pub fn new(name: impl Into<String>, xyz: [f64; 3], rpy: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            origin: Isometry3::from_parts(
                Translation3::new(xyz[0], xyz[1], xyz[2]),
                UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]),
            ),
            axis: Vector3::z_axis(),
            lower: -std::f64::consts::PI,
            upper: std::f64::consts::PI,
        }
    }

    /// 设置关节轴
    pub fn with_axis(mut self, axis: Vector3<f64>) -> Self {
        self.axis = Unit::new_normalize(axis);
        self
    }

    /// 设置位置限位
    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }
}

/// 刚体连杆
#[derive(Debug, Clone)]
pub struct Link {
    /// 连杆名称
    pub name: String,
    /// 质量（kg）
    pub mass: f64,
    /// 质心（连杆坐标系）
    pub com: Vector3<f64>,
    /// 质心处惯量张量（连杆坐标系，kg·m²）
    pub inertia: Matrix3<f64>,
}

impl Link {
    /// 以主惯量（对角）创建连杆
    pub fn new(name: impl Into<String>, mass: f64, com: [f64; 3], inertia_diag: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            mass,
            com: Vector3::from(com),
            inertia: Matrix3::from_diagonal(&Vector3::from(inertia_diag)),
        }
    }

    /// 质点连杆（质心处惯量为零）
    pub fn point_mass(name: impl Into<String>, mass: f64, com: [f64; 3]) -> Self {
        Self::new(name, mass, com, [0.0; 3])
    }
}

/// 固定在某个连杆上的命名参考点
#[derive(Debug, Clone)]
pub struct Site {
    /// 参考点名称
    pub name: String,
    /// 所属连杆索引
    pub link: usize,
    /// 连杆坐标系到参考点的固定变换
    pub offset: Isometry3<f64>,
}

/// 串联旋转关节机械臂
///
/// 第 `i` 个关节连接连杆 `i-1`（`i = 0` 时为固定基座）与连杆 `i`。
#[derive(Debug, Clone)]
pub struct SerialChain {
    pub(crate) joints: Vec<RevoluteJoint>,
    pub(crate) links: Vec<Link>,
    pub(crate) sites: Vec<Site>,
    pub(crate) gravity: Vector3<f64>,
}

impl Default for SerialChain {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialChain {
    /// 空模型，重力 `(0, 0, -9.81)`
    pub fn new() -> Self {
        Self {
            joints: Vec::new(),
            links: Vec::new(),
            sites: Vec::new(),
            gravity: Vector3::new(0.0, 0.0, -crate::STANDARD_GRAVITY),
        }
    }

    /// 追加一个关节及其子连杆
    pub fn with_link(mut self, joint: RevoluteJoint, link: Link) -> Self {
        self.joints.push(joint);
        self.links.push(link);
        self
    }

    /// 在最后一个连杆上追加参考点
    pub fn with_site(mut self, name: impl Into<String>, xyz: [f64; 3]) -> Self {
        let link = self.links.len().saturating_sub(1);
        self.sites.push(Site {
            name: name.into(),
            link,
            offset: Isometry3::translation(xyz[0], xyz[1], xyz[2]),
        });
        self
    }

    /// 设置重力向量
    pub fn with_gravity(mut self, gravity: Vector3<f64>) -> Self {
        self.gravity = gravity;
        self
    }

    /// 去掉重力（控制用模型常用）
    pub fn without_gravity(self) -> Self {
        self.with_gravity(Vector3::zeros())
    }

    /// 自由度
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    /// 重力向量
    pub fn gravity(&self) -> &Vector3<f64> {
        &self.gravity
    }

    /// 关节描述
    pub fn joints(&self) -> &[RevoluteJoint] {
        &self.joints
    }

    /// 连杆描述
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// 参考点名称
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(|s| s.name.as_str())
    }

    /// 按名称查找参考点
    pub fn site(&self, name: &str) -> Result<&Site, PhysicsError> {
        self.sites.iter().find(|s| s.name == name).ok_or_else(|| PhysicsError::UnknownFrame {
            name: name.to_string(),
        })
    }

    /// 关节限位
    pub fn joint_limits(&self) -> JointLimits {
        JointLimits {
            low: DVector::from_iterator(self.dof(), self.joints.iter().map(|j| j.lower)),
            high: DVector::from_iterator(self.dof(), self.joints.iter().map(|j| j.upper)),
        }
    }

    /// 检查模型是否自洽
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.joints.is_empty() {
            return Err(PhysicsError::InvalidModel("chain has no joints".to_string()));
        }
        for (joint, link) in self.joints.iter().zip(&self.links) {
            if joint.lower > joint.upper {
                return Err(PhysicsError::InvalidModel(format!(
                    "joint {} has lower limit {} above upper limit {}",
                    joint.name, joint.lower, joint.upper
                )));
            }
            if !(link.mass.is_finite() && link.mass >= 0.0) {
                return Err(PhysicsError::InvalidModel(format!(
                    "link {} has invalid mass {}",
                    link.name, link.mass
                )));
            }
            if (link.inertia - link.inertia.transpose()).norm() > 1e-12 {
                return Err(PhysicsError::InvalidModel(format!(
                    "link {} inertia is not symmetric",
                    link.name
                )));
            }
        }
        if let Some(site) = self.sites.iter().find(|s| s.link >= self.links.len()) {
            return Err(PhysicsError::InvalidModel(format!(
                "site {} is attached to missing link {}",
                site.name, site.link
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(PhysicsError::NonFiniteState { what: "gravity" });
        }
        Ok(())
    }
}
