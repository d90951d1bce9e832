//! # Configuration Module
//!
//! Redis 클라이언트 등록에 필요한 설정을 관리하는 모듈입니다.
//! Spring Framework의 `@ConfigurationProperties`와 유사하게,
//! 원시 설정값을 읽어 시작 시점에 한 번 검증합니다.
//!
//! ## 모듈 구성
//!
//! - [`redis_config`] - 연결 문자열, 키 형식, 생명주기 설정
//!
//! ## 설정 소스
//!
//! | 소스 | 함수 |
//! |------|------|
//! | 직접 전달 | `RegistrationConfig::build()` |
//! | 환경 변수 | `RedisSettings::from_env()` |
//! | `.env` 파일 | `load_env_file()` 후 `RedisSettings::from_env()` |
//! | JSON 설정 문서 | `RedisSettings::from_json_section()` |
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export REDIS_CONNECTION_STRING="redis://localhost:6379"
//! export REDIS_KEY_FORMAT="^(user|session):"   # 선택
//! export REDIS_CLIENT_LIFETIME="PerScope"      # 선택: PerCall, PerScope, Singleton
//! ```

pub mod redis_config;

pub use redis_config::*;

use std::env;
use log::{info, warn};

/// 환경별 설정 파일을 로드합니다
///
/// `PROFILE` 환경변수에 따라 적절한 .env 파일을 로드합니다.
/// 이미 설정된 환경 변수는 덮어쓰지 않습니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
pub fn load_env_file() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => {
            dotenv::dotenv().ok();
            info!("기본 .env 파일 로드");
            return;
        }
    };

    match dotenv::from_filename(filename) {
        Ok(_) => info!("{} 파일 로드 됨", filename),
        Err(e) => warn!("{} 파일 로드 실패: {}", filename, e),
    }
}
