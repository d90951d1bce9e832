//! # CacheClient 등록
//!
//! 설정을 검증하고, Redis 연결을 한 번 열고, 그 연결을 공유하는 `CacheClient` 팩토리를
//! 서비스 레지스트리에 등록합니다. ASP.NET Core의 `services.AddRedisClient(...)`,
//! Spring의 `@Bean` 설정 메서드에 해당합니다.
//!
//! ## 등록 순서
//!
//! ```text
//! 1. 설정 검증 (실패 시 아무것도 등록하지 않음)
//! 2. RedisDriver 연결 + PING
//! 3. 드라이버를 Singleton으로 등록
//! 4. CacheClient 팩토리를 설정된 생명주기로 등록
//! ```
//!
//! 생명주기와 관계없이 모든 `CacheClient`는 같은 드라이버 연결을 공유합니다.

use std::sync::Arc;
use log::info;
use crate::caching::driver::{CacheDriver, RedisDriver};
use crate::caching::redis::CacheClient;
use crate::config::{RedisSettings, RegistrationConfig, load_env_file};
use crate::core::errors::CacheResult;
use crate::core::registry::ServiceRegistry;

/// 연결 문자열과 선택적 키 형식/생명주기로 `CacheClient`를 등록합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let registry = ServiceRegistry::new();
/// add_redis_client(&registry, "redis://localhost:6379", Some(r"^user:\d+$"), Some("Singleton")).await?;
///
/// let client = registry.resolve::<CacheClient>()?;
/// ```
pub async fn add_redis_client(
    registry: &ServiceRegistry,
    connection_string: &str,
    key_format: Option<&str>,
    lifetime: Option<&str>,
) -> CacheResult<()> {
    let config = RegistrationConfig::build(connection_string, key_format, lifetime)?;
    add_redis_client_with_config(registry, &config).await
}

/// 원시 설정 묶음으로 `CacheClient`를 등록합니다.
pub async fn add_redis_client_with_settings(registry: &ServiceRegistry, settings: &RedisSettings) -> CacheResult<()> {
    let config = RegistrationConfig::from_settings(settings)?;
    add_redis_client_with_config(registry, &config).await
}

/// `.env` 파일과 환경 변수에서 설정을 읽어 `CacheClient`를 등록합니다.
pub async fn add_redis_client_from_env(registry: &ServiceRegistry) -> CacheResult<()> {
    load_env_file();
    let settings = RedisSettings::from_env()?;
    add_redis_client_with_settings(registry, &settings).await
}

/// 검증된 설정으로 Redis에 연결하고 `CacheClient`를 등록합니다.
pub async fn add_redis_client_with_config(registry: &ServiceRegistry, config: &RegistrationConfig) -> CacheResult<()> {
    info!("📡 Redis 연결 중... ({})", config.redacted_connection_string());

    let driver = RedisDriver::connect(config.connection_string()).await?;
    add_cache_client_with_driver(registry, config, Arc::new(driver));

    Ok(())
}

/// 이미 열린 드라이버로 `CacheClient`를 등록합니다.
///
/// 드라이버는 구체 타입 `D`로 Singleton 등록되며, 클라이언트 팩토리는
/// 같은 `Arc`를 공유합니다.
pub fn add_cache_client_with_driver<D>(registry: &ServiceRegistry, config: &RegistrationConfig, driver: Arc<D>)
where
    D: CacheDriver + 'static,
{
    registry.set(driver.clone());

    let shared: Arc<dyn CacheDriver> = driver;
    let key_format = config.key_format().cloned();

    registry.register(config.lifetime(), move || {
        Arc::new(CacheClient::new(shared.clone(), key_format.clone()))
    });

    info!(
        "✅ CacheClient 등록 완료 (생명주기: {}, 키 형식: {})",
        config.lifetime(),
        config.key_format().map_or("없음", |p| p.as_str())
    );
}
