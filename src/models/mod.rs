//! 数据模型定义
//!
//! 业务实体与请求/响应结构，和 `entity` 模块中的数据库模型分离。

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod users;

pub use common::{ApiResponse, AppStartTime, ErrorCode};
