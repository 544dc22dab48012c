//! 工具模块 - 错误、日志、校验
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResult`] - 处理器 Result 别名
//! - [`ok`] / [`ok_message`] - 成功信封辅助函数

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, ok, ok_message};
pub use result::AppResult;
