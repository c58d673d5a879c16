//! 评分

use std::collections::BTreeMap;

use crate::models::{Mcq, QuizResult};

/// 按题目索引对比作答，未作答或答错都计为错误
///
/// 空字符串视为未作答。
pub fn score(mcqs: &[Mcq], answers: &BTreeMap<usize, String>) -> QuizResult {
    let total = mcqs.len();
    let correct = mcqs
        .iter()
        .enumerate()
        .filter(|(index, mcq)| {
            answers
                .get(index)
                .filter(|selected| !selected.is_empty())
                .is_some_and(|selected| mcq.is_correct(selected))
        })
        .count();

    QuizResult {
        correct,
        wrong: total - correct,
        percentage: percentage(correct, total),
        total,
    }
}

/// 正确率百分比，保留两位小数；总数为 0 时为 0
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
