//! 키 형식 검증
//!
//! 등록 시 지정한 정규식으로 캐시 키의 형식을 강제합니다.
//! 검증은 드라이버 호출 이전에 로컬에서 수행되므로, 형식이 맞지 않는 키는
//! Redis 서버에 절대 도달하지 않습니다.

use std::fmt;
use fancy_regex::Regex;
use crate::core::errors::{CacheError, ConfigError};

/// 컴파일된 키 형식 정규식
///
/// 매칭은 부분 일치(`Regex::is_match`)입니다. 키 전체를 강제하려면
/// 패턴에 `^...$` 앵커를 직접 포함해야 합니다.
/// 전방/후방 탐색(`(?!...)`, `(?<=...)`)과 역참조(`\1`)도 지원합니다.
///
/// ```rust,ignore
/// let pattern = KeyPattern::new(r"^user:\d+$")?;
/// assert!(pattern.is_match("user:42"));
/// assert!(!pattern.is_match("42"));
/// ```
#[derive(Clone)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    /// 정규식을 컴파일합니다.
    ///
    /// 빈 문자열은 유효한 키 형식으로 취급하지 않습니다.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern {
                pattern: String::new(),
                reason: "pattern is empty".to_string(),
            });
        }

        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { regex })
    }

    /// 원본 패턴 문자열
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// 키가 패턴과 일치하는지 확인합니다.
    ///
    /// 백트래킹 한도 초과 등 매칭 자체가 실패하면 일치하지 않는 것으로 취급합니다.
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key).unwrap_or_else(|e| {
            log::warn!("⚠️ 키 형식 매칭 실패 ({}): {}", self.as_str(), e);
            false
        })
    }
}

impl fmt::Debug for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyPattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 키가 강제된 형식을 만족하는지 검증합니다.
///
/// # Returns
///
/// - `Ok(())` - 패턴이 없거나 키가 패턴과 일치
/// - `Err(CacheError::InvalidKey)` - 키가 패턴과 일치하지 않음
pub fn validate(key: &str, pattern: Option<&KeyPattern>) -> Result<(), CacheError> {
    match pattern {
        Some(pattern) if !pattern.is_match(key) => Err(CacheError::InvalidKey {
            key: key.to_string(),
            pattern: pattern.as_str().to_string(),
        }),
        _ => Ok(()),
    }
}
