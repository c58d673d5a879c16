pub mod quiz_flow;
pub mod quiz_request;

pub use quiz_flow::{FormOptions, QuestionView, QuizFlow, QuizView};
pub use quiz_request::{parse_answer_fields, GenerateForm, QuizRequest};
