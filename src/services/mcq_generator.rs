//! 题目生成服务 - 业务能力层
//!
//! ## 职责
//!
//! 1. **分批**：把请求的题目数量拆成每批不超过 25 道
//! 2. **顺序调用**：每批调用一次模型，严格按顺序，不并发
//! 3. **快速失败**：任意一批失败立即返回错误，不返回部分结果
//! 4. **校验**：每批返回内容交给 `validation` 做全量校验

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::GenerationError;
use crate::models::{ClassLevel, Mcq, Subject};
use crate::services::llm_service::{ChatBackend, ChatRequest, LlmService};
use crate::services::prompts::{build_mcq_prompt, SYSTEM_PROMPT};
use crate::services::validation::parse_mcqs;
use crate::utils::logging::truncate_text;

/// 单次 API 调用最多生成的题目数量
pub const MAX_BATCH_SIZE: usize = 25;

/// 采样温度（低随机性）
pub const GENERATION_TEMPERATURE: f32 = 0.3;

/// 把总数拆成连续的批次，最后一批为余数
///
/// `plan_batches(60, 25) == [25, 25, 10]`
pub fn plan_batches(total: usize, batch_size: usize) -> Vec<usize> {
    batch_sizes(total, batch_size).collect()
}

fn batch_sizes(total: usize, batch_size: usize) -> impl Iterator<Item = usize> {
    assert!(batch_size > 0, "batch_size 必须大于 0");
    (0..total)
        .step_by(batch_size)
        .map(move |start| batch_size.min(total - start))
}

/// 题目生成器
///
/// 没有配置 API 凭据时 `backend` 为 `None`，每次生成都会返回
/// `GenerationError::MissingCredential`。
pub struct McqGenerator {
    backend: Option<Arc<dyn ChatBackend>>,
}

impl McqGenerator {
    pub fn new(backend: Option<Arc<dyn ChatBackend>>) -> Self {
        Self { backend }
    }

    /// 根据配置创建生成器
    pub fn from_config(config: &Config) -> Self {
        let backend = config
            .api_key()
            .map(|key| Arc::new(LlmService::new(config, key)) as Arc<dyn ChatBackend>);
        if backend.is_none() {
            warn!("⚠️ 未配置 LLM_API_KEY / GOOGLE_API_KEY，所有题目生成请求都会失败");
        }
        Self::new(backend)
    }

    /// 分批生成题目
    ///
    /// 批次严格按顺序执行；任意一批失败都返回错误，已生成的批次全部丢弃。
    pub async fn generate_batches(
        &self,
        subject: Subject,
        class_level: ClassLevel,
        total: usize,
    ) -> Result<Vec<Mcq>, GenerationError> {
        let total_batches = total.div_ceil(MAX_BATCH_SIZE);
        info!(
            "📦 开始生成 {} 年级 {} 题目: 共 {} 道，分 {} 批",
            class_level, subject, total, total_batches
        );

        let mut mcqs = Vec::new();
        for (batch_index, batch_size) in batch_sizes(total, MAX_BATCH_SIZE).enumerate() {
            let batch_num = batch_index + 1;
            debug!("📄 第 {}/{} 批: {} 道", batch_num, total_batches, batch_size);

            match self.generate_one_batch(subject, class_level, batch_size).await {
                Ok(batch) => mcqs.extend(batch),
                Err(e) => {
                    warn!("❌ 第 {}/{} 批生成失败: {}", batch_num, total_batches, e);
                    return Err(e);
                }
            }
        }

        info!("✓ 题目生成完成: 共 {} 道", mcqs.len());
        Ok(mcqs)
    }

    /// 生成单批题目
    pub async fn generate_one_batch(
        &self,
        subject: Subject,
        class_level: ClassLevel,
        count: usize,
    ) -> Result<Vec<Mcq>, GenerationError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;

        let prompt = build_mcq_prompt(subject, class_level, count);
        let request = ChatRequest {
            system_message: SYSTEM_PROMPT,
            user_message: &prompt,
            temperature: GENERATION_TEMPERATURE,
            json_output: true,
        };

        let raw = backend
            .complete(request)
            .await
            .map_err(|e| GenerationError::api_call_failed(backend.model_name(), e))?;

        if raw.trim().is_empty() {
            return Err(GenerationError::EmptyContent {
                model: backend.model_name().to_string(),
            });
        }

        let mcqs = parse_mcqs(&raw).inspect_err(|e| {
            debug!("不合法的模型响应 ({}): {}", e, truncate_text(&raw, 200));
        })?;

        // 数量与请求不一致时照单全收，只记录警告
        if mcqs.len() != count {
            warn!(
                "⚠️ 请求 {} 道题目，模型返回 {} 道，按实际返回数量使用",
                count,
                mcqs.len()
            );
        }

        Ok(mcqs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{BoxFuture, FutureExt};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// 按顺序返回预设响应，并记录收到的提示词
    struct ScriptedBackend {
        responses: Mutex<VecDeque<anyhow::Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<anyhow::Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn model_name(&self) -> &str {
            "scripted"
        }

        fn complete<'a>(&'a self, request: ChatRequest<'a>) -> BoxFuture<'a, anyhow::Result<String>> {
            assert_eq!(request.system_message, SYSTEM_PROMPT);
            assert!(request.json_output);
            assert_eq!(request.temperature, GENERATION_TEMPERATURE);
            self.prompts.lock().unwrap().push(request.user_message.to_string());
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow::anyhow!("没有更多预设响应")));
            async move { next }.boxed()
        }
    }

    fn batch_json(count: usize, offset: usize) -> String {
        let items: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "question": format!("Question {}", offset + i),
                    "options": ["A", "B", "C", "D"],
                    "correct_answer": "A"
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    fn generator_with(backend: &Arc<ScriptedBackend>) -> McqGenerator {
        McqGenerator::new(Some(backend.clone() as Arc<dyn ChatBackend>))
    }

    #[test]
    fn test_plan_batches_examples() {
        assert_eq!(plan_batches(60, 25), vec![25, 25, 10]);
        assert_eq!(plan_batches(25, 25), vec![25]);
        assert_eq!(plan_batches(26, 25), vec![25, 1]);
        assert_eq!(plan_batches(1, 25), vec![1]);
        assert!(plan_batches(0, 25).is_empty());
    }

    #[test]
    fn test_plan_batches_sum_and_bounds() {
        for total in 1..=260 {
            let batches = plan_batches(total, MAX_BATCH_SIZE);
            assert_eq!(batches.iter().sum::<usize>(), total, "total = {}", total);
            assert!(batches.iter().all(|&b| (1..=MAX_BATCH_SIZE).contains(&b)));
            // 只有最后一批可以不满
            assert!(batches[..batches.len() - 1].iter().all(|&b| b == MAX_BATCH_SIZE));
        }
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let generator = McqGenerator::new(None);

        let err = generator
            .generate_batches(Subject::Physics, ClassLevel::Eleven, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[tokio::test]
    async fn test_generate_batches_in_order() {
        let backend = ScriptedBackend::new(vec![
            Ok(batch_json(25, 0)),
            Ok(batch_json(25, 25)),
            Ok(batch_json(10, 50)),
        ]);
        let generator = generator_with(&backend);

        let mcqs = assert_ok!(
            generator
                .generate_batches(Subject::Mathematics, ClassLevel::Twelve, 60)
                .await
        );
        assert_eq!(mcqs.len(), 60);
        assert_eq!(mcqs[0].question(), "Question 0");
        assert_eq!(mcqs[59].question(), "Question 59");

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].starts_with("Generate exactly 25 "));
        assert!(prompts[1].starts_with("Generate exactly 25 "));
        assert!(prompts[2].starts_with("Generate exactly 10 "));
        assert!(prompts[2].contains("Class 12 Mathematics"));
    }

    #[tokio::test]
    async fn test_failed_batch_aborts_remaining() {
        let backend = ScriptedBackend::new(vec![
            Ok(batch_json(25, 0)),
            Ok("not json".to_string()),
            Ok(batch_json(10, 50)),
        ]);
        let generator = generator_with(&backend);

        let err = assert_err!(
            generator
                .generate_batches(Subject::Physics, ClassLevel::Eleven, 60)
                .await
        );
        assert!(err.is_malformed_response());
        // 第三批不会被请求
        assert_eq!(backend.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_api_failure_maps_to_api_call_failed() {
        let backend = ScriptedBackend::new(vec![Err(anyhow::anyhow!("connection reset"))]);
        let generator = generator_with(&backend);

        let err = generator
            .generate_one_batch(Subject::Chemistry, ClassLevel::Eleven, 5)
            .await
            .unwrap_err();
        match err {
            GenerationError::ApiCallFailed { model, source } => {
                assert_eq!(model, "scripted");
                assert!(source.to_string().contains("connection reset"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_content() {
        let backend = ScriptedBackend::new(vec![Ok("   ".to_string())]);
        let generator = generator_with(&backend);

        let err = generator
            .generate_one_batch(Subject::Chemistry, ClassLevel::Eleven, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyContent { .. }));
    }

    #[tokio::test]
    async fn test_count_mismatch_is_accepted() {
        let backend = ScriptedBackend::new(vec![Ok(batch_json(3, 0)), Ok(batch_json(7, 0))]);
        let generator = generator_with(&backend);

        let fewer = generator
            .generate_one_batch(Subject::Physics, ClassLevel::Twelve, 5)
            .await
            .unwrap();
        assert_eq!(fewer.len(), 3);

        let more = generator
            .generate_one_batch(Subject::Physics, ClassLevel::Twelve, 5)
            .await
            .unwrap();
        assert_eq!(more.len(), 7);
    }
}
