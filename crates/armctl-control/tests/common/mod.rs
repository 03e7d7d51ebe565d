//! 集成测试公共设施

#![allow(dead_code)]

pub mod mock_robot;

pub use mock_robot::MockRobot;
