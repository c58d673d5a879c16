//! 会话 Cookie
//!
//! Cookie 中只保存随机的会话 ID，并用密钥签名；测验内容保存在服务端的 `SessionStore`。
//! 签名校验失败或会话不存在时，视为新会话。

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use tracing::debug;
use uuid::Uuid;

use crate::error::ConfigError;
use crate::services::SessionData;
use crate::web::{names, AppState};

/// 派生签名密钥所需的最短密钥长度（字节）
pub const MIN_SECRET_LEN: usize = 32;

/// 根据配置的密钥创建 Cookie 签名密钥
///
/// 未配置时随机生成，进程重启后旧会话全部失效。
pub fn signing_key(secret: Option<&str>) -> Result<Key, ConfigError> {
    match secret {
        Some(secret) if secret.len() < MIN_SECRET_LEN => Err(ConfigError::SecretTooShort {
            len: secret.len(),
            min: MIN_SECRET_LEN,
        }),
        Some(secret) => Ok(Key::derive_from(secret.as_bytes())),
        None => Ok(Key::generate()),
    }
}

/// 当前请求所属的用户会话
#[derive(Debug)]
pub struct UserSession {
    pub id: String,
    pub data: SessionData,
}

/// 打开当前请求的会话，必要时创建新会话并写入 Cookie
pub async fn open(state: &AppState, jar: SignedCookieJar) -> (SignedCookieJar, UserSession) {
    if let Some(id) = jar.get(names::SESSION_COOKIE_NAME).map(|c| c.value().to_string()) {
        let data = state.sessions.load(&id).await;
        return (jar, UserSession { id, data });
    }

    state.sessions.purge_expired().await;

    let id = Uuid::new_v4().to_string();
    debug!("创建新会话: {}", id);

    let cookie = Cookie::build((names::SESSION_COOKIE_NAME, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies);

    let session = UserSession {
        id,
        data: SessionData::default(),
    };
    (jar.add(cookie), session)
}

/// 写回会话
pub async fn save(state: &AppState, session: UserSession) {
    state.sessions.save(&session.id, session.data).await;
}
