/// 年级（班级水平）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLevel {
    Eleven,
    Twelve,
}

impl ClassLevel {
    pub const ALL: [ClassLevel; 2] = [ClassLevel::Eleven, ClassLevel::Twelve];

    /// 表单和提示词中使用的年级代码
    pub fn code(self) -> &'static str {
        match self {
            ClassLevel::Eleven => "11",
            ClassLevel::Twelve => "12",
        }
    }

    /// 从代码解析年级
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.code() == code)
    }
}

impl std::fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(ClassLevel::from_code("11"), Some(ClassLevel::Eleven));
        assert_eq!(ClassLevel::from_code("12"), Some(ClassLevel::Twelve));
        assert_eq!(ClassLevel::from_code("10"), None);
        assert_eq!(ClassLevel::from_code(" 11"), None);
    }
}
