//! Telemetry - 日志初始化

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 初始化全局日志
///
/// `RUST_LOG` 存在时优先于配置中的级别
pub fn init_tracing(log: &LogConfig) {
    let log_filter = format!(
        "{},currency_mesh={},tower_http=debug",
        log.level, log.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
