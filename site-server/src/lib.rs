//! Site Server - 连锁餐厅官网后端
//!
//! # 模块结构
//!
//! ```text
//! site-server/src/
//! ├── core/      # 配置、状态、HTTP 服务器
//! ├── api/       # HTTP 路由和处理器
//! ├── db/        # SQLite 连接池、仓储层
//! ├── cart/      # 购物车管理 (合并、钳制、实时合计)
//! ├── checkout/  # 结账编排、一次性订单交接
//! ├── payment/   # 模拟支付网关
//! ├── email/     # SMTP 联系邮件
//! ├── session.rs # 购物车会话 Cookie
//! └── utils/     # 错误、日志、校验
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod email;
pub mod payment;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use checkout::OrderHandoff;
pub use core::{Config, Server, ServerState};
pub use email::EmailClient;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  _
   / __ \(_)___  ___
  / / / / / __ \/ _ \
 / /_/ / / / / /  __/
/_____/_/_/ /_/\___/
   _____ _ __
  / ___/(_) /____
  \__ \/ / __/ _ \
 ___/ / / /_/  __/
/____/_/\__/\___/
    "#
    );
}
