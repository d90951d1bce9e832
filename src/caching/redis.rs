//! # Redis 캐시 클라이언트
//!
//! 이 모듈은 Redis를 백엔드로 하는 캐시 클라이언트 façade를 제공합니다.
//! Spring Framework의 `RedisTemplate`과 유사한 역할을 수행하며,
//! 모든 연산 전에 키 형식을 검증하고 값은 JSON으로 자동 변환합니다.
//!
//! ## 설계 철학
//!
//! - **얇은 계층**: 저장, 네트워크, 일관성은 모두 Redis와 드라이버에 위임
//! - **검증 우선**: 형식이 맞지 않는 키는 드라이버에 도달하기 전에 거부
//! - **비동기 우선**: 모든 연산은 async/await 기반이며 호출당 한 번의 왕복
//! - **재시도 없음**: 드라이버 에러는 `CacheError::Driver`로 그대로 전달
//!
//! ## 동시성
//!
//! 클라이언트는 잠금을 사용하지 않습니다. 드라이버 핸들은 `Arc`로 공유되며
//! 동시성 안전성은 드라이버가 보장합니다.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use serde::{Serialize, de::DeserializeOwned};
use crate::caching::driver::CacheDriver;
use crate::caching::key_validator::{self, KeyPattern};
use crate::caching::serializer;
use crate::core::errors::{CacheError, CacheResult};

/// Redis 캐시 클라이언트 façade
///
/// 드라이버 핸들은 공유되며 클라이언트가 소유하지 않습니다. 같은 등록에서 만들어진
/// 모든 클라이언트는 하나의 연결을 함께 사용합니다. 복제 비용은 `Arc` 복제 수준입니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use redis_cache_client::caching::redis::CacheClient;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct UserCache {
///     id: String,
///     name: String,
/// }
///
/// let client = registry.resolve::<CacheClient>()?;
///
/// // 사용자 정보 캐싱 (1시간 TTL)
/// let user = UserCache { id: "123".to_string(), name: "John".to_string() };
/// client.push("user:123", &user, Some(Duration::from_secs(3600))).await?;
///
/// // 캐시된 데이터 조회
/// let cached: Option<UserCache> = client.get("user:123").await?;
/// ```
#[derive(Clone)]
pub struct CacheClient {
    driver: Arc<dyn CacheDriver>,
    key_format: Option<KeyPattern>,
}

impl CacheClient {
    /// 공유 드라이버와 선택적 키 형식으로 클라이언트를 생성합니다.
    pub fn new(driver: Arc<dyn CacheDriver>, key_format: Option<KeyPattern>) -> Self {
        Self { driver, key_format }
    }

    /// 강제 중인 키 형식 (없으면 `None`)
    pub fn key_format(&self) -> Option<&KeyPattern> {
        self.key_format.as_ref()
    }

    fn validate_key(&self, key: &str) -> CacheResult<()> {
        key_validator::validate(key, self.key_format.as_ref())
    }

    /// 지정된 키에서 값을 조회합니다.
    ///
    /// ## 반환값
    ///
    /// - `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// - `Ok(None)` - 키가 없거나 저장된 값이 비어있거나 JSON `null`
    /// - `Err(CacheError::InvalidKey)` - 키 형식 위반 (드라이버 호출 없음)
    /// - `Err(CacheError::Serialization)` - 저장된 값이 `T`로 해석되지 않음
    /// - `Err(CacheError::Driver)` - Redis 오류
    ///
    /// ## 예제
    ///
    /// ```rust,ignore
    /// let product: Option<Product> = client.get("product:123").await?;
    ///
    /// match product {
    ///     Some(p) => println!("상품명: {}", p.name),
    ///     None => println!("상품을 찾을 수 없습니다"),
    /// }
    /// ```
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        self.validate_key(key)?;

        let raw = self.driver.get_string(key).await?;

        match raw {
            Some(bytes) if !bytes.is_empty() && !serializer::is_null(&bytes) => {
                log::debug!("캐시 적중: {}", key);
                Ok(Some(serializer::decode(&bytes)?))
            }
            _ => {
                log::debug!("캐시 미스: {}", key);
                Ok(None)
            }
        }
    }

    /// 지정된 키에 값을 저장합니다.
    ///
    /// 기존 값이 있으면 조건 없이 덮어씁니다. `expiry`가 `None`이면 만료 없이 저장됩니다.
    ///
    /// | 용도 | 권장 TTL |
    /// |------|----------|
    /// | 세션 | 1-24시간 |
    /// | API 응답 캐시 | 5-60분 |
    /// | 임시 토큰 | 10-30분 |
    pub async fn push<T: Serialize + ?Sized>(&self, key: &str, value: &T, expiry: Option<Duration>) -> CacheResult<()> {
        self.validate_key(key)?;

        let bytes = serializer::encode(value)?;
        self.driver.set_string(key, bytes, expiry).await?;

        log::debug!("캐시 저장: {} (TTL: {:?})", key, expiry);
        Ok(())
    }

    /// 키가 존재하는지 확인합니다.
    pub async fn key_exists(&self, key: &str) -> CacheResult<bool> {
        self.validate_key(key)?;
        Ok(self.driver.exists(key).await?)
    }

    /// 이미 존재하는 키의 값을 갱신합니다.
    ///
    /// 존재 확인과 저장은 두 번의 독립된 요청입니다. 그 사이에 다른 클라이언트가
    /// 키를 삭제하면 값이 다시 생성되며, 동시에 갱신하면 마지막 저장이 남습니다.
    ///
    /// # Errors
    ///
    /// - `CacheError::NotFound` - 키가 존재하지 않음
    pub async fn update<T: Serialize + ?Sized>(&self, key: &str, value: &T, expiry: Option<Duration>) -> CacheResult<()> {
        if !self.key_exists(key).await? {
            return Err(CacheError::NotFound(key.to_string()));
        }

        self.push(key, value, expiry).await
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 없어도 성공으로 처리합니다.
    pub async fn delete(&self, key: &str) -> CacheResult<()> {
        self.validate_key(key)?;

        self.driver.delete(key).await?;

        log::debug!("캐시 삭제: {}", key);
        Ok(())
    }
}

impl fmt::Debug for CacheClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheClient")
            .field("key_format", &self.key_format)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::driver::memory::MemoryDriver;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u32,
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn client_with(pattern: Option<&str>) -> (CacheClient, Arc<MemoryDriver>) {
        init_logger();
        let driver = Arc::new(MemoryDriver::new());
        let key_format = pattern.map(|p| KeyPattern::new(p).unwrap());
        (CacheClient::new(driver.clone(), key_format), driver)
    }

    fn profile(visits: u32) -> Profile {
        Profile { name: "John".to_string(), visits }
    }

    #[tokio::test]
    async fn test_push_then_get_returns_value() {
        let (client, _) = client_with(None);

        client.push("profile:1", &profile(1), None).await.unwrap();
        let cached: Option<Profile> = client.get("profile:1").await.unwrap();

        assert_eq!(cached, Some(profile(1)));
    }

    #[tokio::test]
    async fn test_enforced_pattern_example() {
        let (client, _) = client_with(Some(r"^user:\d+$"));
        let mut value = HashMap::new();
        value.insert("n".to_string(), 1);

        client.push("user:42", &value, None).await.unwrap();
        let cached: Option<HashMap<String, i32>> = client.get("user:42").await.unwrap();
        assert_eq!(cached, Some(value.clone()));

        let rejected = client.push("42", &value, None).await;
        assert!(matches!(rejected, Err(CacheError::InvalidKey { .. })));
    }

    #[tokio::test]
    async fn test_invalid_key_never_reaches_driver() {
        let (client, driver) = client_with(Some(r"^user:\d+$"));
        let key = "order:7";

        assert!(matches!(client.get::<Profile>(key).await, Err(CacheError::InvalidKey { .. })));
        assert!(matches!(client.push(key, &profile(1), None).await, Err(CacheError::InvalidKey { .. })));
        assert!(matches!(client.update(key, &profile(1), None).await, Err(CacheError::InvalidKey { .. })));
        assert!(matches!(client.delete(key).await, Err(CacheError::InvalidKey { .. })));
        assert!(matches!(client.key_exists(key).await, Err(CacheError::InvalidKey { .. })));

        assert!(driver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_or_empty_returns_none() {
        let (client, driver) = client_with(None);
        driver.insert_raw("empty", b"");

        assert_eq!(client.get::<Profile>("never-written").await.unwrap(), None);
        assert_eq!(client.get::<Profile>("empty").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_stored_null_returns_none() {
        let (client, _) = client_with(None);
        client.push("nickname:1", &None::<String>, None).await.unwrap();

        assert!(client.key_exists("nickname:1").await.unwrap());
        assert_eq!(client.get::<String>("nickname:1").await.unwrap(), None);
        assert_eq!(client.get::<Profile>("nickname:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_with_wrong_shape_fails() {
        let (client, _) = client_with(None);
        client.push("profile:1", &"just a string", None).await.unwrap();

        let result = client.get::<Profile>("profile:1").await;

        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_update_missing_key_fails_with_not_found() {
        let (client, driver) = client_with(None);

        let result = client.update("profile:1", &profile(2), None).await;

        match result {
            Err(CacheError::NotFound(key)) => assert_eq!(key, "profile:1"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(driver.calls(), vec!["EXISTS profile:1".to_string()]);
    }

    #[tokio::test]
    async fn test_update_existing_key_overwrites() {
        let (client, _) = client_with(None);
        client.push("profile:1", &profile(1), None).await.unwrap();

        client.update("profile:1", &profile(2), None).await.unwrap();

        assert_eq!(client.get::<Profile>("profile:1").await.unwrap(), Some(profile(2)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (client, _) = client_with(None);
        client.push("profile:1", &profile(1), None).await.unwrap();

        client.delete("profile:1").await.unwrap();
        client.delete("profile:1").await.unwrap();
        client.delete("never-written").await.unwrap();

        assert!(!client.key_exists("profile:1").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_value_is_gone() {
        let (client, _) = client_with(None);

        client.push("otp:1", &"123456", Some(Duration::from_millis(200))).await.unwrap();
        assert_eq!(client.get::<String>("otp:1").await.unwrap(), Some("123456".to_string()));

        tokio::time::sleep(Duration::from_millis(450)).await;

        assert_eq!(client.get::<String>("otp:1").await.unwrap(), None);
        assert!(!client.key_exists("otp:1").await.unwrap());
    }

    #[tokio::test]
    async fn test_driver_failure_propagates() {
        let (client, driver) = client_with(None);
        driver.go_offline();

        let result = client.get::<Profile>("profile:1").await;

        assert!(matches!(result, Err(CacheError::Driver(_))));
    }

    #[tokio::test]
    async fn test_clones_share_driver() {
        let (client, _) = client_with(None);
        let other = client.clone();

        client.push("profile:1", &profile(5), None).await.unwrap();

        assert_eq!(other.get::<Profile>("profile:1").await.unwrap(), Some(profile(5)));
    }
}
