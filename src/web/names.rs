pub const INDEX_URL: &str = "/";
pub const GENERATE_URL: &str = "/generate";
pub const QUIZ_URL: &str = "/quiz";
pub const SUBMIT_URL: &str = "/submit";
pub const RESULT_URL: &str = "/result";

pub const SESSION_COOKIE_NAME: &str = "mcq_session";

pub const QUIZ_FORM_ID: &str = "quiz-form";
pub const QUIZ_SCRIPT_URL: &str = "/static/quiz.js";
pub const STYLESHEET_URL: &str = "/static/style.css";

pub fn answer_field_name(index: usize) -> String {
    format!("{}{}", crate::workflow::quiz_request::ANSWER_FIELD_PREFIX, index)
}
