/// 科目枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// 物理
    Physics,
    /// 化学
    Chemistry,
    /// 数学
    Mathematics,
}

impl Subject {
    /// 表单中可选的全部科目（按展示顺序）
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Mathematics];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
        }
    }

    /// 从表单值解析科目（精确匹配，区分大小写）
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.name() == s)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_exact_match() {
        assert_eq!(Subject::from_name("Physics"), Some(Subject::Physics));
        assert_eq!(Subject::from_name("Chemistry"), Some(Subject::Chemistry));
        assert_eq!(Subject::from_name("Mathematics"), Some(Subject::Mathematics));
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(Subject::from_name("physics"), None);
        assert_eq!(Subject::from_name("Biology"), None);
        assert_eq!(Subject::from_name(""), None);
    }
}
