use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// 未指定 `CONFIG_FILE` 时尝试读取的默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "mcq_quiz.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 监听地址
    pub bind_address: String,
    /// 会话 Cookie 签名密钥（至少 32 字节），未设置时每次启动随机生成
    pub session_secret: Option<String>,
    /// 会话闲置过期时间（分钟）
    pub session_ttl_minutes: i64,
    /// 是否给会话 Cookie 加 Secure 标记
    pub secure_cookies: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    /// 未设置时所有生成请求都会失败，但服务照常启动
    pub llm_api_key: Option<String>,
    /// OpenAI 兼容端点。请求使用 JSON 对象模式：Gemini 允许顶层数组，
    /// 严格要求对象的服务需返回 `{"questions": [...]}`
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            session_secret: None,
            session_ttl_minutes: 120,
            secure_cookies: false,
            verbose_logging: false,
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-flash".to_string(),
            llm_max_tokens: 8192,
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选）作为基础，环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides(|name| std::env::var(name).ok()))
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖已有配置
    ///
    /// 无法解析的值保持原配置不变。
    pub fn with_env_overrides(self, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        Self {
            bind_address: var("BIND_ADDRESS").unwrap_or(self.bind_address),
            session_secret: non_empty("SESSION_SECRET").or(self.session_secret),
            session_ttl_minutes: var("SESSION_TTL_MINUTES").and_then(|v| v.parse().ok()).unwrap_or(self.session_ttl_minutes),
            secure_cookies: var("SECURE_COOKIES").and_then(|v| v.parse().ok()).unwrap_or(self.secure_cookies),
            verbose_logging: var("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            llm_api_key: non_empty("LLM_API_KEY")
                .or_else(|| non_empty("GOOGLE_API_KEY"))
                .or(self.llm_api_key),
            llm_api_base_url: var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_max_tokens: var("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
        }
    }

    /// 有效的 API 凭据（空字符串视为未配置）
    pub fn api_key(&self) -> Option<&str> {
        self.llm_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
