//! 테스트용 인메모리 드라이버
//!
//! Redis 서버 없이 `CacheClient`를 검증하기 위한 드라이버입니다.
//! 모든 호출을 기록하므로 "드라이버에 접근하지 않았다"는 것을 확인할 수 있습니다.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use redis::{ErrorKind, RedisError, RedisResult};
use super::CacheDriver;

struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self) -> bool {
        self.expires_at.is_none_or(|at| Instant::now() < at)
    }
}

#[derive(Default)]
pub(crate) struct MemoryDriver {
    entries: Mutex<HashMap<String, Entry>>,
    calls: Mutex<Vec<String>>,
    offline: Mutex<bool>,
}

impl MemoryDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 클라이언트를 거치지 않고 원시 값을 직접 저장합니다.
    pub(crate) fn insert_raw(&self, key: &str, value: &[u8]) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).insert(
            key.to_string(),
            Entry { value: value.to_vec(), expires_at: None },
        );
    }

    /// 지금까지 받은 명령 목록 (`"GET user:1"` 형태)
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// 이후 모든 호출이 연결 에러로 실패하도록 설정합니다.
    pub(crate) fn go_offline(&self) {
        *self.offline.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    fn record(&self, command: &str, key: &str) -> RedisResult<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{} {}", command, key));

        if *self.offline.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(RedisError::from((ErrorKind::IoError, "connection lost")));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheDriver for MemoryDriver {
    async fn get_string(&self, key: &str) -> RedisResult<Option<Vec<u8>>> {
        self.record("GET", key)?;
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).filter(|e| e.is_live()).map(|e| e.value.clone()))
    }

    async fn set_string(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> RedisResult<()> {
        self.record("SET", key)?;
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn exists(&self, key: &str) -> RedisResult<bool> {
        self.record("EXISTS", key)?;
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).is_some_and(Entry::is_live))
    }

    async fn delete(&self, key: &str) -> RedisResult<()> {
        self.record("DEL", key)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
