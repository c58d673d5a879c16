//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择默认级别。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "mcq_quiz=debug,info"
    } else {
        "mcq_quiz=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - MCQ 测验生成服务");
    info!("🌐 监听地址: {}", config.bind_address);
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("⏱️ 会话过期时间: {} 分钟", config.session_ttl_minutes);
    if config.api_key().is_none() {
        warn!("⚠️ 未配置 API 凭据，生成请求将提示用户稍后重试");
    }
    if config.session_secret.is_none() {
        warn!("⚠️ 未配置 SESSION_SECRET，使用随机密钥，重启后所有会话失效");
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        // 按字符而不是字节截断
        assert_eq!(truncate_text("物理化学数学", 2), "物理...");
    }
}
