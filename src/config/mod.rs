//! 配置管理
//!
//! 配置来源按优先级叠加：`linkdeck.toml`（可选）→ `LINKDECK_` 前缀的
//! 环境变量（`LINKDECK_SERVER__PORT=9000` 形式）。加载一次后缓存在
//! `OnceLock` 中，进程内只读。

mod structs;

pub use structs::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};

use std::sync::OnceLock;

use config::{Config, Environment, File};
use tracing::warn;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 初始化并返回全局配置
///
/// 幂等：重复调用返回同一份配置。加载失败时回退到默认值，
/// 不会让进程在启动阶段崩溃。
pub fn init_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(|| match load_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    })
}

/// 获取全局配置，未初始化时先初始化
pub fn get_config() -> &'static AppConfig {
    init_config()
}

fn load_config() -> Result<AppConfig, config::ConfigError> {
    Config::builder()
        .add_source(File::with_name("linkdeck").required(false))
        .add_source(
            Environment::with_prefix("LINKDECK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
