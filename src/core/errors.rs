//! # Cache Client Error Handling
//!
//! 캐시 클라이언트 전역에서 사용하는 에러 타입 모음입니다.
//! `thiserror`로 `Error` trait을 구현하고, 외부 라이브러리 에러는
//! `#[from]` 변환으로 그대로 감싸서 원인 체인을 보존합니다.
//!
//! ## 에러 분류
//!
//! | 에러 | 발생 위치 | 드라이버 접근 여부 |
//! |------|-----------|--------------------|
//! | `InvalidKey` | 키 형식 검증 | 접근하지 않음 |
//! | `NotFound` | `update` 대상 키 없음 | 존재 확인만 수행 |
//! | `Serialization` | JSON 인코딩/디코딩 | - |
//! | `Config` | 시작 시 설정 검증 | 접근하지 않음 |
//! | `Driver` | Redis 통신/서버 오류 | 원본 에러 그대로 전달 |
//! | `Registry` | 레지스트리 조회 실패 | - |
//!
//! ## 전파 정책
//!
//! 모든 에러는 호출자에게 `Result`로 그대로 반환됩니다.
//! 재시도하거나 조용히 무시하는 경로는 없습니다.
//! 단, 존재하지 않는 키의 `delete`는 에러가 아닙니다.

use thiserror::Error;

/// 캐시 클라이언트 작업 에러
///
/// `CacheClient`의 모든 연산과 등록 과정에서 반환되는 최상위 에러입니다.
///
/// # 예제
///
/// ```rust,ignore
/// match client.update("user:42", &profile, None).await {
///     Ok(()) => {}
///     Err(CacheError::NotFound(key)) => log::warn!("갱신 대상 없음: {}", key),
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CacheError {
    /// 키가 강제된 키 형식과 일치하지 않음
    ///
    /// 드라이버에 요청을 보내기 전에 로컬에서 검출됩니다.
    #[error("Key '{key}' does not match the enforced key format '{pattern}'")]
    InvalidKey { key: String, pattern: String },

    /// `update` 대상 키가 존재하지 않음
    #[error("Key '{0}' does not exist")]
    NotFound(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정 검증 실패
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Redis 드라이버 에러 (타임아웃, 연결 끊김, 서버 오류 등)
    #[error("Redis error: {0}")]
    Driver(#[from] redis::RedisError),

    /// 서비스 레지스트리 조회 실패
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// 등록 설정 검증 에러
///
/// 모두 애플리케이션 시작 시점에 발생하며, 발생하면 아무것도 등록되지 않습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 연결 문자열이 비어있거나 공백뿐임
    #[error("Connection string cannot be null or empty")]
    EmptyConnectionString,

    /// 키 형식 정규식이 올바르지 않음
    #[error("Invalid regex for key format '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// 지원하지 않는 클라이언트 생명주기
    #[error("Unsupported client lifetime '{0}' (expected PerCall, PerScope or Singleton)")]
    UnknownLifetime(String),

    /// 설정 소스에 필수 항목이 없음
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    /// 설정 문서를 해석할 수 없음
    #[error("Invalid settings document: {0}")]
    InvalidSettings(String),
}

/// 서비스 레지스트리 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// 요청한 타입이 등록되어 있지 않음
    #[error("Service not registered: {0}. Register it with ServiceRegistry::set() or ServiceRegistry::register()")]
    NotRegistered(&'static str),

    /// 등록된 인스턴스의 타입이 요청 타입과 다름
    #[error("Type mismatch for service: {0}")]
    TypeMismatch(&'static str),
}

/// 편의성을 위한 Result 타입 별칭
///
/// ```rust,ignore
/// async fn load_profile(client: &CacheClient) -> CacheResult<Option<Profile>> {
///     client.get("profile:1").await
/// }
/// ```
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message_contains_key_and_pattern() {
        let error = CacheError::InvalidKey {
            key: "42".to_string(),
            pattern: r"^user:\d+$".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("'42'"));
        assert!(message.contains(r"^user:\d+$"));
    }

    #[test]
    fn test_config_error_converts_into_cache_error() {
        let error: CacheError = ConfigError::EmptyConnectionString.into();

        assert!(matches!(error, CacheError::Config(ConfigError::EmptyConnectionString)));
    }

    #[test]
    fn test_serde_error_converts_into_serialization() {
        let parse_error = serde_json::from_str::<u32>("not a number").unwrap_err();
        let error: CacheError = parse_error.into();

        assert!(matches!(error, CacheError::Serialization(_)));
    }

    #[test]
    fn test_registry_error_message() {
        let error = RegistryError::NotRegistered("CacheClient");

        assert!(error.to_string().contains("CacheClient"));
    }
}
