//! LLM 服务 - 业务能力层
//!
//! 只负责"调用生成式模型"能力，不关心题目格式和流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（默认使用 Gemini 的 OpenAI 兼容端点）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, warn};

use crate::config::Config;

/// 一次聊天补全请求
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system_message: &'a str,
    pub user_message: &'a str,
    pub temperature: f32,
    /// 要求模型以 JSON 对象格式返回
    pub json_output: bool,
}

/// 生成式模型后端
///
/// 输入提示词，输出自由文本。题目生成只依赖这个能力，
/// 测试时可以替换为脚本化的实现。
pub trait ChatBackend: Send + Sync {
    /// 模型名称（仅用于日志和错误信息）
    fn model_name(&self) -> &str;

    fn complete<'a>(&'a self, request: ChatRequest<'a>) -> BoxFuture<'a, Result<String>>;
}

/// LLM 服务
///
/// 职责：
/// - 调用 OpenAI 兼容的聊天补全接口
/// - 不解析返回内容
/// - 不重试
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config, api_key: &str) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `temperature`: 采样温度
    /// - `json_output`: 是否要求返回 JSON 对象
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: f32,
        json_output: bool,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let mut request_args = CreateChatCompletionRequestArgs::default();
        request_args
            .model(&self.model_name)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(self.max_tokens);
        if json_output {
            // Gemini 允许顶层数组；严格的服务只能返回对象，校验层接受 {"questions": [...]}
            request_args.response_format(ResponseFormat::JsonObject);
        }
        let request = request_args.build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}

impl ChatBackend for LlmService {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn complete<'a>(&'a self, request: ChatRequest<'a>) -> BoxFuture<'a, Result<String>> {
        self.send_to_llm(
            request.user_message,
            Some(request.system_message),
            request.temperature,
            request.json_output,
        )
        .boxed()
    }
}
