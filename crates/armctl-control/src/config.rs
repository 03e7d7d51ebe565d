//! 控制器配置文件
//!
//! ```toml
//! [controller]
//! type = "ImpedanceController"
//! frame = "peg_tip"
//! stiffness = [200.0, 200.0, 200.0, 20.0, 20.0, 20.0]
//! damping = 5.0
//! ```
//!
//! `type` 之外的键原样交给注册表中对应的工厂解析，未知键会被拒绝。

use crate::controller::TorqueController;
use crate::error::Result;
use crate::registry::ControllerRegistry;
use armctl_physics::RobotDescription;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 配置文件根
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerFile {
    /// `[controller]` 段
    pub controller: ControllerSection,
}

/// `[controller]` 段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSection {
    /// 注册名
    #[serde(rename = "type")]
    pub kind: String,

    /// 其余参数
    #[serde(flatten)]
    pub params: toml::Table,
}

impl ControllerFile {
    /// 从文件加载
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_toml_str(&content)?;
        info!(path = %path.display(), controller = %file.controller.kind, "controller config loaded");
        Ok(file)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 经注册表构造控制器
    pub fn build(
        &self,
        registry: &ControllerRegistry,
        robot: &dyn RobotDescription,
    ) -> Result<Box<dyn TorqueController>> {
        registry.construct(&self.controller.kind, &self.controller.params, robot)
    }
}
