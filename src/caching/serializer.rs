//! JSON 직렬화
//!
//! 캐시에 저장되는 모든 값은 `serde_json`으로 인코딩된 UTF-8 JSON입니다.
//! 다른 언어의 클라이언트와 같은 키를 공유하더라도 값을 그대로 읽을 수 있습니다.

use serde::{Serialize, de::DeserializeOwned};
use crate::core::errors::CacheResult;

/// 값을 JSON 바이트로 인코딩합니다.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> CacheResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// JSON 바이트를 값으로 디코딩합니다.
///
/// 형식이 잘못되었거나 대상 타입과 맞지 않으면 `CacheError::Serialization`을 반환합니다.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CacheResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// 저장된 값이 JSON `null`인지 확인합니다.
pub fn is_null(bytes: &[u8]) -> bool {
    bytes.trim_ascii() == b"null"
}
