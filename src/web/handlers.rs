use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::SignedCookieJar;
use maud::Markup;

use crate::error::{InputError, QuizError};
use crate::web::{names, session, session::UserSession, views, AppState};
use crate::workflow::{parse_answer_fields, GenerateForm};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::INDEX_URL, get(index))
        .route(names::GENERATE_URL, post(generate))
        .route(names::QUIZ_URL, get(quiz))
        .route(names::SUBMIT_URL, post(submit))
        .route(names::RESULT_URL, get(result))
}

/// 渲染页面，失败时记录提示并回到首页
fn page_or_redirect(session: &mut UserSession, rendered: Result<Markup, QuizError>) -> Response {
    match rendered {
        Ok(markup) => markup.into_response(),
        Err(e) => redirect_home(session, &e),
    }
}

/// 表单解析失败按输入错误处理
fn form_or_input_error<T>(form: Result<Form<T>, FormRejection>) -> Result<T, QuizError> {
    form.map(|Form(value)| value).map_err(|rejection| {
        QuizError::InvalidInput(InputError::MalformedForm {
            reason: rejection.body_text(),
        })
    })
}

fn redirect_home(session: &mut UserSession, error: &QuizError) -> Response {
    tracing::debug!("重定向到首页: {}", error);
    session.data.flash(error.user_notice());
    Redirect::to(names::INDEX_URL).into_response()
}

async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Markup) {
    let (jar, mut session) = session::open(&state, jar).await;

    let flashes = session.data.take_flashes();
    let markup = views::index(&state.flow.render_form(), &flashes);

    session::save(&state, session).await;
    (jar, markup)
}

async fn generate(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<GenerateForm>, FormRejection>,
) -> (SignedCookieJar, Response) {
    let (jar, mut session) = session::open(&state, jar).await;

    let generated = match form_or_input_error(form) {
        Ok(form) => state.flow.generate(&mut session.data.quiz, &form).await,
        Err(e) => Err(e),
    };
    let response = match generated {
        Ok(()) => Redirect::to(names::QUIZ_URL).into_response(),
        Err(e) => redirect_home(&mut session, &e),
    };

    session::save(&state, session).await;
    (jar, response)
}

async fn quiz(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Response) {
    let (jar, mut session) = session::open(&state, jar).await;

    let rendered = state
        .flow
        .show_quiz(&session.data.quiz)
        .map(|view| views::quiz(&view));
    let response = page_or_redirect(&mut session, rendered);

    session::save(&state, session).await;
    (jar, response)
}

async fn submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    fields: Result<Form<HashMap<String, String>>, FormRejection>,
) -> (SignedCookieJar, Response) {
    let (jar, mut session) = session::open(&state, jar).await;

    let submitted = form_or_input_error(fields).and_then(|fields| {
        let answers = parse_answer_fields(&fields);
        state.flow.submit(&mut session.data.quiz, answers)
    });
    let response = match submitted {
        Ok(_) => Redirect::to(names::RESULT_URL).into_response(),
        Err(e) => redirect_home(&mut session, &e),
    };

    session::save(&state, session).await;
    (jar, response)
}

async fn result(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Response) {
    let (jar, mut session) = session::open(&state, jar).await;

    let rendered = state
        .flow
        .show_result(&session.data.quiz)
        .map(|(meta, result)| views::result(meta, result));
    let response = page_or_redirect(&mut session, rendered);

    session::save(&state, session).await;
    (jar, response)
}
