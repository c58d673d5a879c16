//! 测验流程 - 流程层
//!
//! 核心职责：定义一个用户会话内的测验流程
//!
//! 状态流转：
//! 1. NoQuiz → 生成成功 → Active
//! 2. Active → 提交 → Scored
//! 3. Scored → 再次生成 → Active（覆盖旧测验）
//! 4. 任意状态 → 会话过期 → NoQuiz（下次访问时发现）
//!
//! 会话槽位由调用方显式传入，本层不持有任何会话存储。

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::QuizError;
use crate::models::{ClassLevel, QuizMeta, QuizResult, QuizSession, Subject};
use crate::services::{scoring, McqGenerator};
use crate::workflow::quiz_request::{GenerateForm, QuizRequest};

/// 首页表单的可选项
#[derive(Debug, Clone, Copy)]
pub struct FormOptions {
    pub subjects: &'static [Subject],
    pub class_levels: &'static [ClassLevel],
}

/// 展示给用户的题目（不含正确答案）
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub index: usize,
    pub question: &'a str,
    pub options: &'a [String],
}

/// 展示给用户的测验
#[derive(Debug, Clone)]
pub struct QuizView<'a> {
    pub meta: &'a QuizMeta,
    pub questions: Vec<QuestionView<'a>>,
}

/// 测验流程
///
/// - 决定何时生成、何时评分
/// - 只依赖业务能力（services）
/// - 不关心 HTTP 和页面渲染
pub struct QuizFlow {
    generator: McqGenerator,
}

impl QuizFlow {
    pub fn new(generator: McqGenerator) -> Self {
        Self { generator }
    }

    /// 首页表单：可选科目和年级
    pub fn render_form(&self) -> FormOptions {
        FormOptions {
            subjects: &Subject::ALL,
            class_levels: &ClassLevel::ALL,
        }
    }

    /// 生成测验
    ///
    /// 成功时覆盖会话中的旧测验（包括旧答案和旧结果）；
    /// 失败时会话保持原样，部分生成的题目全部丢弃。
    pub async fn generate(
        &self,
        slot: &mut Option<QuizSession>,
        form: &GenerateForm,
    ) -> Result<(), QuizError> {
        let request = QuizRequest::parse(form).inspect_err(|e| {
            info!("表单输入不合法: {}", e);
        })?;

        info!("{} 🔍 开始生成测验", request);

        let mcqs = self
            .generator
            .generate_batches(request.subject, request.class_level, request.count)
            .await
            .inspect_err(|e| {
                warn!("{} ❌ 生成失败: {}", request, e);
            })?;

        let meta = QuizMeta {
            subject: request.subject,
            class_level: request.class_level,
            total: request.count,
        };
        *slot = Some(QuizSession::new(meta, mcqs));

        info!("{} ✓ 测验已生成", request);
        Ok(())
    }

    /// 查看测验：只暴露题干和选项
    pub fn show_quiz<'a>(&self, slot: &'a Option<QuizSession>) -> Result<QuizView<'a>, QuizError> {
        let session = slot.as_ref().ok_or(QuizError::NoActiveQuiz)?;

        let questions = session
            .mcqs
            .iter()
            .enumerate()
            .map(|(index, mcq)| QuestionView {
                index,
                question: mcq.question(),
                options: mcq.options(),
            })
            .collect();

        Ok(QuizView {
            meta: &session.meta,
            questions,
        })
    }

    /// 提交答案并评分
    ///
    /// 重复提交会覆盖上一次的答案和结果。
    pub fn submit(
        &self,
        slot: &mut Option<QuizSession>,
        answers: BTreeMap<usize, String>,
    ) -> Result<QuizResult, QuizError> {
        let session = slot.as_mut().ok_or(QuizError::SessionExpired)?;

        let result = scoring::score(&session.mcqs, &answers);
        session.submitted_answers = answers;
        session.result = Some(result);

        info!(
            "📊 评分完成: 正确 {}/{} ({}%)",
            result.correct, result.total, result.percentage
        );
        Ok(result)
    }

    /// 查看结果
    pub fn show_result<'a>(
        &self,
        slot: &'a Option<QuizSession>,
    ) -> Result<(&'a QuizMeta, &'a QuizResult), QuizError> {
        let session = slot.as_ref().ok_or(QuizError::NoResult)?;
        let result = session.result.as_ref().ok_or(QuizError::NoResult)?;
        Ok((&session.meta, result))
    }
}
