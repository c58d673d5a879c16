use std::fmt;

/// 测验流程错误类型
///
/// 所有错误都可以由用户从首页重新开始来恢复，不会导致进程退出。
#[derive(Debug)]
pub enum QuizError {
    /// 表单输入不合法
    InvalidInput(InputError),
    /// 题目生成失败（凭据缺失、API 失败、响应格式错误）
    GenerationFailed(GenerationError),
    /// 查看测验时没有可用的测验
    NoActiveQuiz,
    /// 提交时会话中的测验已不存在
    SessionExpired,
    /// 查看结果时没有可用的结果
    NoResult,
}

impl QuizError {
    /// 展示给用户的提示文案
    ///
    /// 凭据缺失和响应格式错误对用户不做区分，统一提示重试。
    pub fn user_notice(&self) -> &'static str {
        match self {
            QuizError::InvalidInput(_) => "Please select a valid subject, class, and MCQ count.",
            QuizError::GenerationFailed(_) => "Unable to generate MCQs right now. Please try again.",
            QuizError::NoActiveQuiz => "Please generate a quiz first.",
            QuizError::SessionExpired => "Your quiz session expired. Please generate again.",
            QuizError::NoResult => "No results found. Please generate a quiz first.",
        }
    }
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InvalidInput(e) => write!(f, "输入错误: {}", e),
            QuizError::GenerationFailed(e) => write!(f, "生成错误: {}", e),
            QuizError::NoActiveQuiz => write!(f, "会话中没有测验"),
            QuizError::SessionExpired => write!(f, "测验会话已过期"),
            QuizError::NoResult => write!(f, "会话中没有评分结果"),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::InvalidInput(e) => Some(e),
            QuizError::GenerationFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InputError> for QuizError {
    fn from(err: InputError) -> Self {
        QuizError::InvalidInput(err)
    }
}

impl From<GenerationError> for QuizError {
    fn from(err: GenerationError) -> Self {
        QuizError::GenerationFailed(err)
    }
}

/// 表单输入错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 科目不在可选范围内
    UnknownSubject { value: Option<String> },
    /// 年级不在可选范围内
    UnknownClassLevel { value: Option<String> },
    /// 题目数量不是正整数
    InvalidQuestionCount { value: Option<String> },
    /// 请求体不是可解析的表单
    MalformedForm { reason: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::UnknownSubject { value } => write!(f, "未知科目: {:?}", value),
            InputError::UnknownClassLevel { value } => write!(f, "未知年级: {:?}", value),
            InputError::InvalidQuestionCount { value } => {
                write!(f, "题目数量必须是正整数: {:?}", value)
            }
            InputError::MalformedForm { reason } => write!(f, "表单无法解析: {}", reason),
        }
    }
}

impl std::error::Error for InputError {}

/// 题目校验错误
///
/// 任意一题不合法都会使整批题目作废。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 顶层不是数组
    NotAnArray,
    /// 数组为空
    EmptyArray,
    /// 数组元素不是对象
    ItemNotObject { index: usize },
    /// 缺少必填字段
    MissingField { index: usize, field: &'static str },
    /// 字段不是字符串
    FieldNotString { index: usize, field: &'static str },
    /// 字段去除空白后为空
    BlankField { index: usize, field: &'static str },
    /// options 不是数组
    OptionsNotArray { index: usize },
    /// 选项数量不是 4
    WrongOptionCount { index: usize, found: usize },
    /// 某个选项不是字符串
    OptionNotString { index: usize, option: usize },
    /// 某个选项去除空白后为空
    BlankOption { index: usize, option: usize },
    /// 正确答案不在选项中
    AnswerNotInOptions { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnArray => write!(f, "响应不是 JSON 数组"),
            ValidationError::EmptyArray => write!(f, "响应数组中没有题目"),
            ValidationError::ItemNotObject { index } => write!(f, "第 {} 题不是对象", index),
            ValidationError::MissingField { index, field } => {
                write!(f, "第 {} 题缺少字段 {}", index, field)
            }
            ValidationError::FieldNotString { index, field } => {
                write!(f, "第 {} 题的字段 {} 不是字符串", index, field)
            }
            ValidationError::BlankField { index, field } => {
                write!(f, "第 {} 题的字段 {} 为空", index, field)
            }
            ValidationError::BlankOption { index, option } => {
                write!(f, "第 {} 题的第 {} 个选项为空", index, option)
            }
            ValidationError::OptionsNotArray { index } => {
                write!(f, "第 {} 题的 options 不是数组", index)
            }
            ValidationError::WrongOptionCount { index, found } => {
                write!(f, "第 {} 题有 {} 个选项，应为 4 个", index, found)
            }
            ValidationError::OptionNotString { index, option } => {
                write!(f, "第 {} 题的第 {} 个选项不是字符串", index, option)
            }
            ValidationError::AnswerNotInOptions { index } => {
                write!(f, "第 {} 题的正确答案不在选项中", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 题目生成错误
#[derive(Debug)]
pub enum GenerationError {
    /// 未配置 API 凭据
    MissingCredential,
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    EmptyContent { model: String },
    /// 返回内容不是合法 JSON
    InvalidJson { source: serde_json::Error },
    /// JSON 结构不符合题目格式
    InvalidSchema(ValidationError),
}

impl GenerationError {
    /// 是否属于响应格式错误（JSON 解析或结构校验失败）
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            GenerationError::InvalidJson { .. } | GenerationError::InvalidSchema(_)
        )
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingCredential => write!(f, "未配置 LLM API 凭据"),
            GenerationError::ApiCallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            GenerationError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
            GenerationError::InvalidJson { source } => write!(f, "JSON解析失败: {}", source),
            GenerationError::InvalidSchema(e) => write!(f, "题目格式不合法: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::ApiCallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            GenerationError::InvalidJson { source } => Some(source),
            GenerationError::InvalidSchema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for GenerationError {
    fn from(err: ValidationError) -> Self {
        GenerationError::InvalidSchema(err)
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::InvalidJson { source: err }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 会话密钥过短，无法派生签名密钥
    SecretTooShort { len: usize, min: usize },
    /// 读取配置文件失败
    FileReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SecretTooShort { len, min } => {
                write!(f, "SESSION_SECRET 长度为 {} 字节，至少需要 {} 字节", len, min)
            }
            ConfigError::FileReadFailed { path, source } => {
                write!(f, "读取配置文件失败 ({}): {}", path, source)
            }
            ConfigError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::FileReadFailed { source, .. } => Some(source),
            ConfigError::TomlParseFailed { source, .. } => Some(source),
            ConfigError::SecretTooShort { .. } => None,
        }
    }
}

// ========== 便捷构造函数 ==========

impl GenerationError {
    /// 创建LLM API调用错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        GenerationError::ApiCallFailed {
            model: model.into(),
            source: source.into(),
        }
    }
}
