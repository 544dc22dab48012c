/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | data/site.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYMENT_FAILURE_RATE | 0.05 | 模拟支付拒绝概率 |
/// | PAYMENT_DELAY_MS | 1500 | 模拟支付延迟(毫秒) |
/// | CHECKOUT_TAX_RATE | 0.08 | 结账税率 |
/// | SMTP_HOST | (unset) | SMTP 服务器 (未设置则禁用邮件) |
/// | SMTP_PORT | 587 | SMTP 端口 |
/// | SMTP_USER / SMTP_PASSWORD | (unset) | SMTP 凭证 |
/// | SENDER_EMAIL | (unset) | 发件人地址 |
/// | CONTACT_RECIPIENT | info@example.com | 联系表单收件人 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/site.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 模拟支付拒绝概率 (0.0 - 1.0)
    pub payment_failure_rate: f64,
    /// 模拟支付处理延迟 (毫秒)
    pub payment_delay_ms: u64,
    /// 结账时在购物车小计上叠加的税率
    pub checkout_tax_rate: f64,
    /// SMTP 邮件配置
    pub smtp: SmtpConfig,
}

/// SMTP 配置 - `host` 未设置时邮件客户端以禁用模式运行
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub sender: Option<String>,
    pub recipient: String,
}

impl Config {
    /// 从环境变量加载配置，未设置的使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/site.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            payment_failure_rate: std::env::var("PAYMENT_FAILURE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.05),
            payment_delay_ms: std::env::var("PAYMENT_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1500),
            checkout_tax_rate: std::env::var("CHECKOUT_TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.08),
            smtp: SmtpConfig {
                host: std::env::var("SMTP_HOST").ok(),
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                user: std::env::var("SMTP_USER").ok(),
                password: std::env::var("SMTP_PASSWORD").ok(),
                sender: std::env::var("SENDER_EMAIL").ok(),
                recipient: std::env::var("CONTACT_RECIPIENT")
                    .unwrap_or_else(|_| "info@example.com".into()),
            },
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
