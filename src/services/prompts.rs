//! 题目生成提示词

use crate::models::{ClassLevel, Subject};

/// 系统指令
pub const SYSTEM_PROMPT: &str = "You are an experienced teacher who writes exam-quality multiple-choice \
questions for senior secondary school students. Every question must be factually correct, \
self-contained and answerable without diagrams. You always answer with raw JSON only: \
no markdown fences, no commentary.";

/// 用户提示词模板，占位符为 `{subject}`、`{class_level}`、`{count}`
pub const MCQ_PROMPT_TEMPLATE: &str = r#"Generate exactly {count} multiple-choice questions for Class {class_level} {subject}.

Rules:
1. Cover different topics from the Class {class_level} {subject} syllabus.
2. Each question has exactly 4 distinct options.
3. Exactly one option is correct, and "correct_answer" must repeat that option's text verbatim.
4. Do not use "All of the above" or "None of the above".
5. Vary the position of the correct option.

Return a JSON array in this exact shape:
[
  {
    "question": "question text",
    "options": ["option A", "option B", "option C", "option D"],
    "correct_answer": "option B"
  }
]"#;

/// 按模板构建生成题目的提示词
pub fn build_mcq_prompt(subject: Subject, class_level: ClassLevel, count: usize) -> String {
    MCQ_PROMPT_TEMPLATE
        .replace("{subject}", subject.name())
        .replace("{class_level}", class_level.code())
        .replace("{count}", &count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mcq_prompt_substitutes_all_placeholders() {
        let prompt = build_mcq_prompt(Subject::Chemistry, ClassLevel::Twelve, 25);

        assert!(prompt.starts_with("Generate exactly 25 multiple-choice questions for Class 12 Chemistry."));
        assert!(prompt.contains("Class 12 Chemistry syllabus"));
        assert!(!prompt.contains("{subject}"));
        assert!(!prompt.contains("{class_level}"));
        assert!(!prompt.contains("{count}"));
        // JSON 示例中的花括号保持原样
        assert!(prompt.contains("\"correct_answer\": \"option B\""));
    }
}
