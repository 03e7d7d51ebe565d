//! 机器人模型预设

use crate::chain::{Link, RevoluteJoint, SerialChain};
use std::f64::consts::{FRAC_PI_2, PI};

/// 度转弧度
fn deg(value: f64) -> f64 {
    value.to_radians()
}

impl SerialChain {
    /// KUKA LBR iiwa 14 R820（7 自由度）
    ///
    /// 几何与惯量参数取自公开 URDF 描述（近似值）。末端带两个参考点：
    ///
    /// - `ee`: 法兰中心
    /// - `peg_tip`: 法兰外 0.1 m 处的插销尖端
    pub fn kuka_iiwa14() -> Self {
        SerialChain::new()
            .with_link(
                RevoluteJoint::new("iiwa_joint_1", [0.0, 0.0, 0.1575], [0.0, 0.0, 0.0])
                    .with_limits(deg(-170.0), deg(170.0)),
                Link::new("iiwa_link_1", 4.0, [0.0, -0.03, 0.12], [0.1, 0.09, 0.02]),
            )
            .with_link(
                RevoluteJoint::new("iiwa_joint_2", [0.0, 0.0, 0.2025], [FRAC_PI_2, 0.0, PI])
                    .with_limits(deg(-120.0), deg(120.0)),
                Link::new("iiwa_link_2", 4.0, [0.0003, 0.059, 0.042], [0.05, 0.018, 0.044]),
            )
            .with_link(
                RevoluteJoint::new("iiwa_joint_3", [0.0, 0.2045, 0.0], [FRAC_PI_2, 0.0, PI])
                    .with_limits(deg(-170.0), deg(170.0)),
                Link::new("iiwa_link_3", 3.0, [0.0, 0.03, 0.13], [0.08, 0.075, 0.01]),
            )
            .with_link(
                RevoluteJoint::new("iiwa_joint_4", [0.0, 0.0, 0.2155], [FRAC_PI_2, 0.0, 0.0])
                    .with_limits(deg(-120.0), deg(120.0)),
                Link::new("iiwa_link_4", 2.7, [0.0, 0.067, 0.034], [0.03, 0.01, 0.029]),
            )
            .with_link(
                RevoluteJoint::new("iiwa_joint_5", [0.0, 0.1845, 0.0], [-FRAC_PI_2, PI, 0.0])
                    .with_limits(deg(-170.0), deg(170.0)),
                Link::new("iiwa_link_5", 1.7, [0.0001, 0.021, 0.076], [0.02, 0.018, 0.005]),
            )
            .with_link(
                RevoluteJoint::new("iiwa_joint_6", [0.0, 0.0, 0.2155], [FRAC_PI_2, 0.0, 0.0])
                    .with_limits(deg(-120.0), deg(120.0)),
                Link::new("iiwa_link_6", 1.8, [0.0, 0.0006, 0.0004], [0.005, 0.0036, 0.0047]),
            )
            .with_link(
                RevoluteJoint::new("iiwa_joint_7", [0.0, 0.081, 0.0], [-FRAC_PI_2, PI, 0.0])
                    .with_limits(deg(-175.0), deg(175.0)),
                Link::new("iiwa_link_7", 0.3, [0.0, 0.0, 0.02], [0.001, 0.001, 0.001]),
            )
            .with_site("ee", [0.0, 0.0, 0.045])
            .with_site("peg_tip", [0.0, 0.0, 0.145])
    }
}
