//! # MCQ Quiz
//!
//! 调用生成式模型出单选题、在浏览器会话中作答并评分的 Web 服务
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据模型（Models）
//! - `models/` - 科目、年级、题目、测验会话和评分结果
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `LlmService` - 调用生成式模型的能力
//! - `McqGenerator` - 分批生成并校验题目
//! - `scoring` - 评分
//! - `SessionStore` - 按用户隔离的会话存储
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义一个会话内"生成 → 作答 → 评分"的完整流程
//! - `QuizFlow` - 会话槽位显式传入，不持有存储
//!
//! ### ④ Web 层
//! - `web/` - 路由、会话 Cookie、页面渲染
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{ConfigError, GenerationError, InputError, QuizError, ValidationError};
pub use models::{ClassLevel, Mcq, QuizMeta, QuizResult, QuizSession, QuizStage, Subject};
pub use services::{ChatBackend, ChatRequest, LlmService, McqGenerator, SessionStore};
pub use utils::logging;
pub use web::{router, AppState};
pub use workflow::QuizFlow;
