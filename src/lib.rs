//! Redis 캐시 클라이언트
//!
//! 원격 Redis 캐시 위에 얇은 façade를 제공하는 라이브러리입니다.
//! 제네릭 get/set/update/delete/exists 연산, 정규식 기반 키 형식 강제,
//! 그리고 생명주기(PerCall / PerScope / Singleton)를 지원하는 의존성 주입 등록을 제공합니다.
//!
//! # Features
//!
//! - **키 형식 강제**: 형식이 맞지 않는 키는 Redis에 도달하기 전에 거부
//! - **자동 직렬화**: serde 기반 JSON 변환
//! - **존재 확인 갱신**: `update`는 존재하는 키만 갱신
//! - **공유 연결**: 모든 클라이언트가 하나의 `ConnectionManager`를 공유
//! - **생명주기 DI**: 등록 시 선택한 정책으로 인스턴스 수 관리
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ RegistrationConfig  │ ← 연결 문자열 / 키 형식 / 생명주기 검증
//! └─────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────┐
//! │  ServiceRegistry    │ ← CacheClient 팩토리 + 공유 드라이버
//! └─────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────┐
//! │    CacheClient      │ ← 키 검증 → 직렬화 → 드라이버 호출
//! └─────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────┐
//! │ RedisDriver (redis) │ ← 외부 캐시 서버
//! └─────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use redis_cache_client::caching::redis::CacheClient;
//! use redis_cache_client::caching::registration::add_redis_client;
//! use redis_cache_client::core::ServiceRegistry;
//!
//! let registry = ServiceRegistry::new();
//! add_redis_client(&registry, "redis://localhost:6379", Some(r"^user:\d+$"), Some("PerScope")).await?;
//!
//! // 요청 단위 스코프
//! let scope = registry.create_scope();
//! let cache = scope.resolve::<CacheClient>()?;
//!
//! cache.push("user:42", &profile, None).await?;
//! let cached: Option<Profile> = cache.get("user:42").await?;
//! ```

pub mod core;
pub mod config;
pub mod caching;

pub use crate::caching::redis::CacheClient;
pub use crate::core::errors::{CacheError, CacheResult, ConfigError, RegistryError};
pub use crate::core::registry::{LifetimePolicy, ServiceRegistry, ServiceScope};
