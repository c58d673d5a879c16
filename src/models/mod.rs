pub mod class_level;
pub mod mcq;
pub mod quiz;
pub mod subject;

pub use class_level::ClassLevel;
pub use mcq::{Mcq, OPTION_COUNT};
pub use quiz::{QuizMeta, QuizResult, QuizSession, QuizStage};
pub use subject::Subject;
