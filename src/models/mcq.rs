/// 单选题选项数量
pub const OPTION_COUNT: usize = 4;

/// 经过校验的单选题
///
/// 只能由 `services::validation` 创建，创建后不可修改：
/// - 恰好 4 个选项，顺序与模型返回一致
/// - `correct_answer` 一定是其中一个选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mcq {
    question: String,
    options: [String; OPTION_COUNT],
    correct_answer: String,
}

impl Mcq {
    pub(crate) fn new(
        question: String,
        options: [String; OPTION_COUNT],
        correct_answer: String,
    ) -> Self {
        debug_assert!(options.contains(&correct_answer));
        Self {
            question,
            options,
            correct_answer,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// 判断作答是否正确（精确字符串比较，不做任何归一化）
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_answer == selected
    }
}
