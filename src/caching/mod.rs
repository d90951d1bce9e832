//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시 클라이언트와 그 구성 요소를 제공합니다.
//!
//! # 주요 기능
//!
//! - [`key_validator`] - 정규식 기반 키 형식 강제
//! - [`serializer`] - JSON 기반 자동 직렬화/역직렬화
//! - [`driver`] - Redis 드라이버 경계 (`CacheDriver`, `RedisDriver`)
//! - [`redis`] - `CacheClient` façade (get / push / update / key_exists / delete)
//! - [`registration`] - 서비스 레지스트리 등록
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use redis_cache_client::caching::redis::CacheClient;
//! use redis_cache_client::caching::registration::add_redis_client;
//!
//! add_redis_client(&registry, "redis://localhost:6379", Some(r"^user:\d+$"), None).await?;
//!
//! let cache = registry.create_scope().resolve::<CacheClient>()?;
//! cache.push("user:123", &user_data, None).await?;
//! cache.update("user:123", &updated, Some(Duration::from_secs(3600))).await?;
//!
//! let cached_user: Option<User> = cache.get("user:123").await?;
//! cache.delete("user:123").await?;
//! ```

pub mod driver;
pub mod key_validator;
pub mod redis;
pub mod registration;
pub mod serializer;
