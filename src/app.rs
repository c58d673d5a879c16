use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::utils::logging::log_startup;
use crate::web::{self, AppState};

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let state = AppState::from_config(&config).context("初始化应用状态失败")?;

        Ok(Self { config, state })
    }

    /// 运行应用主逻辑，直到收到 Ctrl+C
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_address)
            .await
            .with_context(|| format!("无法监听地址: {}", self.config.bind_address))?;

        info!("✓ 服务已启动: http://{}", listener.local_addr()?);

        axum::serve(listener, web::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
    }
}
