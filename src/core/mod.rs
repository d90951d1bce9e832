//! # Core Framework Module
//!
//! 캐시 클라이언트를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceRegistry**: 타입 기반 인스턴스 등록/조회
//! - **LifetimePolicy**: PerCall / PerScope / Singleton 생명주기
//! - **ServiceScope**: 스코프 단위 인스턴스 캐시
//!
//! ### [`errors`] - 통합 에러 처리
//! - **CacheError**: 클라이언트 연산 에러
//! - **ConfigError**: 시작 시점 설정 에러
//! - **RegistryError**: 레지스트리 조회 에러
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use redis_cache_client::core::{LifetimePolicy, ServiceRegistry};
//!
//! let registry = ServiceRegistry::new();
//! registry.register(LifetimePolicy::Singleton, || Arc::new(AppClock::default()));
//!
//! let scope = registry.create_scope();
//! let clock = scope.resolve::<AppClock>()?;
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
