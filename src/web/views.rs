use maud::{html, Markup, DOCTYPE};

use crate::models::{QuizMeta, QuizResult};
use crate::web::names;
use crate::workflow::{FormOptions, QuizView};

const APP_TITLE: &str = "AI MCQ Quiz";

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                link rel="stylesheet" href=(names::STYLESHEET_URL);
                title { (title) " - " (APP_TITLE) }
            }
            body {
                header {
                    a href=(names::INDEX_URL) { strong { (APP_TITLE) } }
                }
                main { (body) }
            }
        }
    }
}

fn notices(flashes: &[String]) -> Markup {
    html! {
        @for message in flashes {
            div."notice" role="alert" { (message) }
        }
    }
}

fn quiz_heading(meta: &QuizMeta) -> Markup {
    html! {
        p { "Class " (meta.class_level) " " (meta.subject) }
    }
}

pub fn index(options: &FormOptions, flashes: &[String]) -> Markup {
    page(
        "Create a quiz",
        html! {
            h1 { "Create a quiz" }
            (notices(flashes))
            form method="post" action=(names::GENERATE_URL) {
                label for="subject" { "Subject" }
                select id="subject" name="subject" required {
                    @for subject in options.subjects {
                        option value=(subject.name()) { (subject.name()) }
                    }
                }
                label for="class_level" { "Class" }
                select id="class_level" name="class_level" required {
                    @for level in options.class_levels {
                        option value=(level.code()) { "Class " (level.code()) }
                    }
                }
                label for="question_count" { "Number of MCQs" }
                input id="question_count" type="number" name="question_count" min="1" value="10" required;
                button type="submit" { "Generate quiz" }
            }
        },
    )
}

pub fn quiz(view: &QuizView<'_>) -> Markup {
    page(
        "Quiz",
        html! {
            h1 { "Quiz" }
            (quiz_heading(view.meta))
            form id=(names::QUIZ_FORM_ID) method="post" action=(names::SUBMIT_URL) {
                @for question in &view.questions {
                    @let field = names::answer_field_name(question.index);
                    fieldset {
                        legend { (question.index + 1) ". " (question.question) }
                        @for option in question.options {
                            label {
                                input type="radio" name=(field) value=(option);
                                " " (option)
                            }
                        }
                    }
                }
                button type="submit" { "Submit answers" }
            }
            script src=(names::QUIZ_SCRIPT_URL) {}
        },
    )
}

pub fn result(meta: &QuizMeta, result: &QuizResult) -> Markup {
    page(
        "Result",
        html! {
            h1 { "Your result" }
            (quiz_heading(meta))
            p."score" { (format!("{:.2}%", result.percentage)) }
            table {
                tbody {
                    tr { th { "Correct" } td { (result.correct) } }
                    tr { th { "Wrong" } td { (result.wrong) } }
                    tr { th { "Total" } td { (result.total) } }
                }
            }
            p {
                a href=(names::QUIZ_URL) { "Review quiz" }
                " · "
                a href=(names::INDEX_URL) { "Create another quiz" }
            }
        },
    )
}
