//! Web 层
//!
//! HTTP 路由、会话 Cookie 和页面渲染。所有失败路径都重定向到首页并附带提示，
//! 不使用错误状态码。

pub mod handlers;
pub mod names;
pub mod session;
pub mod statics;
pub mod views;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::error::ConfigError;
use crate::services::{McqGenerator, SessionStore};
use crate::workflow::QuizFlow;

#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<QuizFlow>,
    pub sessions: SessionStore,
    pub cookie_key: Key,
    pub secure_cookies: bool,
}

impl AppState {
    /// 按配置创建应用状态
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let generator = McqGenerator::from_config(config);
        Ok(Self {
            flow: Arc::new(QuizFlow::new(generator)),
            sessions: SessionStore::with_ttl_minutes(config.session_ttl_minutes),
            cookie_key: session::signing_key(config.session_secret.as_deref())?,
            secure_cookies: config.secure_cookies,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes())
        .nest("/static", statics::routes())
        .with_state(state)
}
