#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use axum_extra::extract::cookie::Key;
use futures::future::{BoxFuture, FutureExt};
use mcq_quiz::{router, AppState, ChatBackend, ChatRequest, McqGenerator, QuizFlow, SessionStore};
use tower::ServiceExt;

/// 按顺序返回预设响应的模型后端
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ChatBackend for ScriptedBackend {
    fn model_name(&self) -> &str {
        "scripted"
    }

    fn complete<'a>(&'a self, request: ChatRequest<'a>) -> BoxFuture<'a, anyhow::Result<String>> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.user_message.to_string());
        let next = self.responses.lock().unwrap().pop_front();
        async move { next.ok_or_else(|| anyhow::anyhow!("没有更多预设响应")) }.boxed()
    }
}

/// 生成 `count` 道题目的 JSON，每题正确答案都是 "B"
pub fn batch_json(count: usize) -> String {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "question": format!(" Question {} ", i),
                "options": ["A", "B", "C", "D"],
                "correct_answer": "B"
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

pub fn app_with(backend: Option<Arc<dyn ChatBackend>>) -> Router {
    let state = AppState {
        flow: Arc::new(QuizFlow::new(McqGenerator::new(backend))),
        sessions: SessionStore::with_ttl_minutes(30),
        cookie_key: Key::generate(),
        secure_cookies: false,
    };
    router(state)
}

pub fn scripted_app(backend: &Arc<ScriptedBackend>) -> Router {
    app_with(Some(backend.clone() as Arc<dyn ChatBackend>))
}

/// 简单的浏览器模拟：自动保存并回传会话 Cookie
pub struct TestClient {
    app: Router,
    pub cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        self.post_with_content_type(uri, form, Some("application/x-www-form-urlencoded"))
            .await
    }

    pub async fn post_with_content_type(
        &mut self,
        uri: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> Response<Body> {
        self.send(Method::POST, uri, Body::from(body.to_string()), content_type)
            .await
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> Response<Body> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            req = req.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            req = req.header(header::COOKIE, cookie.clone());
        }

        let resp = self
            .app
            .clone()
            .oneshot(req.body(body).expect("request build should succeed"))
            .await
            .expect("router should respond");

        if let Some(set_cookie) = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        resp
    }
}

pub fn location(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}
