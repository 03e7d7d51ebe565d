//! 控制器注册表
//!
//! 名称 → 工厂函数的映射。工厂接收控制器参数表（TOML）与机器人描述，
//! 返回装箱的 [`TorqueController`]。
//!
//! 注册表是普通值，不是进程级全局：调用方自行创建、按需注册，然后交给
//! 配置加载或 CLI 使用。
//!
//! ```no_run
//! use armctl_control::ControllerRegistry;
//! use armctl_physics::{ArmSimulator, SerialChain};
//!
//! let registry = ControllerRegistry::with_builtin();
//! let sim = ArmSimulator::new(SerialChain::kuka_iiwa14())?;
//! let params = toml::from_str("kp = 50.0")?;
//! let ctrl = registry.construct("InverseDynamicsController", &params, &sim)?;
//! assert_eq!(ctrl.name(), "InverseDynamicsController");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::controller::TorqueController;
use crate::error::{ControlError, Result};
use crate::impedance::{ImpedanceConfig, ImpedanceController};
use crate::inverse_dynamics::{
    InverseDynamicsConfig, InverseDynamicsController, RelativeInverseDynamicsController,
};
use armctl_physics::RobotDescription;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// 控制器工厂
pub type ControllerFactory = Box<
    dyn Fn(&toml::Table, &dyn RobotDescription) -> Result<Box<dyn TorqueController>> + Send + Sync,
>;

/// 控制器注册表
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 预注册三个内置控制器
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(ImpedanceController::NAME, |params, robot| {
            let config: ImpedanceConfig = parse_params(ImpedanceController::NAME, params)?;
            Ok(Box::new(ImpedanceController::new(config, robot)?))
        });
        registry.insert(InverseDynamicsController::NAME, |params, robot| {
            let config: InverseDynamicsConfig =
                parse_params(InverseDynamicsController::NAME, params)?;
            Ok(Box::new(InverseDynamicsController::new(config, robot)?))
        });
        registry.insert(RelativeInverseDynamicsController::NAME, |params, robot| {
            let config: InverseDynamicsConfig =
                parse_params(RelativeInverseDynamicsController::NAME, params)?;
            Ok(Box::new(RelativeInverseDynamicsController::new(config, robot)?))
        });
        registry
    }

    fn insert<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&toml::Table, &dyn RobotDescription) -> Result<Box<dyn TorqueController>>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// 注册新控制器
    ///
    /// # 错误
    ///
    /// 名称已存在时返回 [`ControlError::DuplicateController`]，原注册保持不变。
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn(&toml::Table, &dyn RobotDescription) -> Result<Box<dyn TorqueController>>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ControlError::DuplicateController(name));
        }
        info!(controller = %name, "controller registered");
        self.insert(&name, factory);
        Ok(())
    }

    /// 按名称构造控制器
    ///
    /// # 错误
    ///
    /// 名称未注册时返回 [`ControlError::UnknownController`]；参数或机器人
    /// 不满足控制器要求时返回工厂给出的错误。
    pub fn construct(
        &self,
        name: &str,
        params: &toml::Table,
        robot: &dyn RobotDescription,
    ) -> Result<Box<dyn TorqueController>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ControlError::UnknownController(name.to_string()))?;
        debug!(controller = name, "constructing controller");
        factory(params, robot)
    }

    /// 名称是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// 已注册名称（字典序）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 已注册数量
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry").field("names", &self.names()).finish()
    }
}

/// 把参数表反序列化为具体配置
pub fn parse_params<T: DeserializeOwned>(controller: &str, params: &toml::Table) -> Result<T> {
    toml::Value::Table(params.clone())
        .try_into()
        .map_err(|e| ControlError::InvalidConfig(format!("{controller}: {e}")))
}
