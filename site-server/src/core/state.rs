use std::sync::Arc;

use sqlx::SqlitePool;

use crate::checkout::OrderHandoff;
use crate::core::Config;
use crate::db::DbService;
use crate::email::EmailClient;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆的成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | email | SMTP 邮件客户端 |
/// | handoff | 结账订单一次性交接存储 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub email: Arc<EmailClient>,
    pub handoff: Arc<OrderHandoff>,
}

impl ServerState {
    /// 手动构造 (测试中与 [`initialize()`] 等价)
    pub fn new(
        config: Config,
        pool: SqlitePool,
        email: Arc<EmailClient>,
        handoff: Arc<OrderHandoff>,
    ) -> Self {
        Self {
            config,
            pool,
            email,
            handoff,
        }
    }

    /// 初始化服务器状态：打开数据库、应用迁移、装配邮件客户端
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let email = EmailClient::from_config(&config.smtp);

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            email: Arc::new(email),
            handoff: Arc::new(OrderHandoff::new()),
        })
    }
}
