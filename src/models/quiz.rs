use std::collections::BTreeMap;

use super::{ClassLevel, Mcq, Subject};

/// 测验元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizMeta {
    pub subject: Subject,
    pub class_level: ClassLevel,
    /// 用户请求的题目数量
    pub total: usize,
}

/// 评分结果
///
/// 不变量：`correct + wrong == total`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub correct: usize,
    pub wrong: usize,
    pub percentage: f64,
    pub total: usize,
}

/// 会话中当前测验所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStage {
    /// 尚未生成测验（或会话已过期）
    NoQuiz,
    /// 已生成，等待提交
    Active,
    /// 已提交并评分
    Scored,
}

/// 单个用户会话中的测验状态
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub meta: QuizMeta,
    pub mcqs: Vec<Mcq>,
    /// 题目索引 → 用户选择的选项文本
    pub submitted_answers: BTreeMap<usize, String>,
    pub result: Option<QuizResult>,
}

impl QuizSession {
    /// 用新生成的题目创建测验
    pub fn new(meta: QuizMeta, mcqs: Vec<Mcq>) -> Self {
        Self {
            meta,
            mcqs,
            submitted_answers: BTreeMap::new(),
            result: None,
        }
    }

    /// 根据会话槽位推导当前阶段
    pub fn stage(slot: &Option<QuizSession>) -> QuizStage {
        match slot {
            None => QuizStage::NoQuiz,
            Some(session) if session.result.is_some() => QuizStage::Scored,
            Some(_) => QuizStage::Active,
        }
    }
}
