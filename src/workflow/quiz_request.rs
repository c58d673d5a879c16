//! 测验请求
//!
//! 封装"用户要生成什么测验"以及"用户提交了哪些答案"这两类表单输入

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use serde::Deserialize;

use crate::error::InputError;
use crate::models::{ClassLevel, Subject};

/// 提交表单中答案字段的前缀，字段名形如 `question_3`
pub const ANSWER_FIELD_PREFIX: &str = "question_";

/// 生成测验的原始表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateForm {
    pub subject: Option<String>,
    pub class_level: Option<String>,
    pub question_count: Option<String>,
}

/// 校验通过的生成请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRequest {
    pub subject: Subject,
    pub class_level: ClassLevel,
    pub count: usize,
}

impl QuizRequest {
    /// 校验表单
    ///
    /// 科目和年级必须精确匹配可选值；题目数量必须是正整数，
    /// 非数字或缺失都按 0 处理并拒绝。
    pub fn parse(form: &GenerateForm) -> Result<Self, InputError> {
        let subject = form
            .subject
            .as_deref()
            .and_then(Subject::from_name)
            .ok_or_else(|| InputError::UnknownSubject {
                value: form.subject.clone(),
            })?;

        let class_level = form
            .class_level
            .as_deref()
            .and_then(ClassLevel::from_code)
            .ok_or_else(|| InputError::UnknownClassLevel {
                value: form.class_level.clone(),
            })?;

        let count = form
            .question_count
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let count = usize::try_from(count)
            .ok()
            .filter(|&count| count > 0)
            .ok_or_else(|| InputError::InvalidQuestionCount {
                value: form.question_count.clone(),
            })?;

        Ok(Self {
            subject,
            class_level,
            count,
        })
    }
}

impl Display for QuizRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[科目#{} 年级#{} 题数#{}]",
            self.subject, self.class_level, self.count
        )
    }
}

/// 从提交表单中提取答案
///
/// 只接受 `question_<索引>` 形式的字段，其余字段忽略。
pub fn parse_answer_fields(fields: &HashMap<String, String>) -> BTreeMap<usize, String> {
    fields
        .iter()
        .filter_map(|(name, value)| {
            let index = name.strip_prefix(ANSWER_FIELD_PREFIX)?.parse::<usize>().ok()?;
            Some((index, value.clone()))
        })
        .collect()
}
