//! 会话存储 - 业务能力层
//!
//! 进程内的会话表，按会话 ID 隔离每个用户的测验状态。
//! 处理器读出自己会话的副本，修改后再写回；生成题目期间不持有锁。
//! 过期会话在下一次访问时才被发现（惰性过期），不启动后台任务。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::QuizSession;

/// 单个用户的会话数据
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// 当前测验（包含作答和评分结果）
    pub quiz: Option<QuizSession>,
    /// 待展示的提示消息，首页渲染时取出
    pub flashes: Vec<String>,
}

impl SessionData {
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flashes.push(message.into());
    }

    /// 取出所有待展示的提示消息
    pub fn take_flashes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.flashes)
    }
}

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: DateTime<Utc>,
}

/// 会话存储
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn with_ttl_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes))
    }

    /// 读取会话副本；不存在或已过期时返回空会话
    pub async fn load(&self, id: &str) -> SessionData {
        self.load_at(id, Utc::now()).await
    }

    /// 写回会话并刷新最后访问时间
    pub async fn save(&self, id: &str, data: SessionData) {
        self.save_at(id, data, Utc::now()).await
    }

    /// 清除所有过期会话，返回清除数量
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub(crate) async fn load_at(&self, id: &str, now: DateTime<Utc>) -> SessionData {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(id) {
            Some(entry) => self.is_expired(entry, now),
            None => return SessionData::default(),
        };

        if expired {
            debug!("会话已过期: {}", id);
            entries.remove(id);
            return SessionData::default();
        }

        entries
            .get(id)
            .map(|entry| entry.data.clone())
            .unwrap_or_default()
    }

    pub(crate) async fn save_at(&self, id: &str, data: SessionData, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            id.to_string(),
            Entry {
                data,
                last_seen: now,
            },
        );
    }

    pub(crate) async fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!("清除过期会话 {} 个", purged);
        }
        purged
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen > self.ttl
    }
}
