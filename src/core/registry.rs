//! # Service Registry - 생명주기 기반 의존성 주입
//!
//! 이 모듈은 캐시 클라이언트를 애플리케이션에 주입하기 위한 작은 DI 컨테이너입니다.
//! 타입(`TypeId`)을 키로 팩토리를 등록하고, 등록 시 지정한 [`LifetimePolicy`]에 따라
//! 인스턴스를 몇 개 만들지 결정합니다.
//!
//! ## 생명주기 비교
//!
//! | 정책 | ASP.NET / Spring 대응 | 인스턴스 수 |
//! |------|------------------------|-------------|
//! | `PerCall` | `Transient` / `@Scope("prototype")` | 조회할 때마다 새로 생성 |
//! | `PerScope` | `Scoped` / `@RequestScope` | 스코프당 하나 |
//! | `Singleton` | `Singleton` / `@Scope("singleton")` | 레지스트리당 하나 |
//!
//! ## 구성 요소
//!
//! ### ServiceRegistry (루트 컨테이너)
//! - **등록 테이블**: `TypeId` → 팩토리 + 생명주기
//! - **싱글톤 슬롯**: `OnceCell`로 첫 조회 시점에 한 번만 생성
//! - **루트 스코프**: 스코프 밖에서 조회한 `PerScope` 인스턴스를 보관
//! - **Thread-safe**: `RwLock`으로 테이블 보호
//!
//! ### ServiceScope (요청 단위 컨테이너)
//! - 자신만의 `PerScope` 캐시를 가짐
//! - `Singleton`은 루트와 공유, `PerCall`은 매번 새로 생성
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::new();
//!
//! // 외부에서 만든 인스턴스 등록 (항상 Singleton)
//! registry.set(Arc::new(driver));
//!
//! // 팩토리 등록
//! registry.register(LifetimePolicy::PerScope, move || Arc::new(CacheClient::new(shared.clone(), None)));
//!
//! // 요청 처리
//! let scope = registry.create_scope();
//! let client = scope.resolve::<CacheClient>()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use once_cell::sync::OnceCell;
use crate::core::errors::{ConfigError, RegistryError};

/// 레지스트리가 인스턴스를 생성하고 재사용하는 규칙
///
/// 정책은 인스턴스의 **개수**에만 영향을 주며 인스턴스의 동작은 바꾸지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifetimePolicy {
    /// 조회할 때마다 새 인스턴스
    PerCall,
    /// 스코프당 하나의 인스턴스 (기본값)
    #[default]
    PerScope,
    /// 레지스트리 전체에서 하나의 인스턴스
    Singleton,
}

impl LifetimePolicy {
    /// 정책의 표준 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifetimePolicy::PerCall => "PerCall",
            LifetimePolicy::PerScope => "PerScope",
            LifetimePolicy::Singleton => "Singleton",
        }
    }
}

impl fmt::Display for LifetimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifetimePolicy {
    type Err = ConfigError;

    /// 대소문자를 구분하지 않고 생명주기 이름을 해석합니다.
    ///
    /// `_`, `-` 구분자는 무시하며, DI 컨테이너에서 흔히 쓰는
    /// `Transient`(= PerCall), `Scoped`(= PerScope) 별칭도 허용합니다.
    ///
    /// ```rust,ignore
    /// assert_eq!("singleton".parse::<LifetimePolicy>()?, LifetimePolicy::Singleton);
    /// assert_eq!("per_call".parse::<LifetimePolicy>()?, LifetimePolicy::PerCall);
    /// assert_eq!("Scoped".parse::<LifetimePolicy>()?, LifetimePolicy::PerScope);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "percall" | "transient" => Ok(LifetimePolicy::PerCall),
            "perscope" | "scoped" => Ok(LifetimePolicy::PerScope),
            "singleton" => Ok(LifetimePolicy::Singleton),
            _ => Err(ConfigError::UnknownLifetime(s.to_string())),
        }
    }
}

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;
/// 스코프 캐시 항목은 자신을 만든 등록 정보를 함께 보관합니다.
/// 재등록 이후에는 포인터가 달라지므로 이전 인스턴스는 재사용되지 않습니다.
type ScopeCache = RwLock<HashMap<TypeId, (Arc<Registration>, Instance)>>;

/// 타입 하나에 대한 등록 정보
struct Registration {
    /// 로그 및 에러 메시지용 타입 이름
    type_name: &'static str,
    lifetime: LifetimePolicy,
    factory: Factory,
    /// `Singleton` 정책일 때만 사용되는 인스턴스 슬롯
    singleton: OnceCell<Instance>,
}

impl Registration {
    fn create(&self) -> Instance {
        (self.factory)()
    }

    fn singleton(&self) -> Instance {
        self.singleton.get_or_init(|| self.create()).clone()
    }
}

/// 생명주기 기반 의존성 주입 컨테이너
///
/// Spring의 `ApplicationContext`, ASP.NET Core의 `IServiceProvider`와 같은 역할을 합니다.
/// 루트 레지스트리에서 직접 조회하면 레지스트리 자체가 하나의 스코프처럼 동작합니다.
///
/// # 예제
///
/// ```rust,ignore
/// let registry = ServiceRegistry::new();
/// registry.register(LifetimePolicy::Singleton, || Arc::new(Settings::default()));
///
/// let a = registry.resolve::<Settings>()?;
/// let b = registry.resolve::<Settings>()?;
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct ServiceRegistry {
    registrations: RwLock<HashMap<TypeId, Arc<Registration>>>,
    root_scope: ScopeCache,
}

impl ServiceRegistry {
    /// 비어있는 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(HashMap::new()),
            root_scope: RwLock::new(HashMap::new()),
        }
    }

    /// 외부에서 생성된 인스턴스를 `Singleton`으로 직접 등록합니다.
    ///
    /// Spring의 `registerSingleton()`과 동일한 역할로, 드라이버 연결처럼
    /// 레지스트리 밖에서 만들어진 인프라 컴포넌트를 등록할 때 사용합니다.
    pub fn set<T: 'static + Send + Sync>(&self, instance: Arc<T>) {
        let slot = OnceCell::new();
        let _ = slot.set(instance.clone() as Instance);

        self.insert::<T>(Registration {
            type_name: std::any::type_name::<T>(),
            lifetime: LifetimePolicy::Singleton,
            factory: Arc::new(move || instance.clone() as Instance),
            singleton: slot,
        });
    }

    /// 팩토리를 지정한 생명주기로 등록합니다.
    ///
    /// 같은 타입이 이미 등록되어 있으면 새 등록으로 대체됩니다 (마지막 등록 우선).
    /// 팩토리는 레지스트리 잠금을 잡은 상태로 호출될 수 있으므로
    /// 팩토리 안에서 같은 레지스트리를 다시 조회하면 안 됩니다.
    pub fn register<T, F>(&self, lifetime: LifetimePolicy, factory: F)
    where
        T: 'static + Send + Sync,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.insert::<T>(Registration {
            type_name: std::any::type_name::<T>(),
            lifetime,
            factory: Arc::new(move || factory() as Instance),
            singleton: OnceCell::new(),
        });
    }

    fn insert<T: 'static>(&self, registration: Registration) {
        let type_id = TypeId::of::<T>();
        let clean_name = short_type_name(registration.type_name);

        log::debug!("📦 Registering: {} ({})", clean_name, registration.lifetime);

        let previous = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, Arc::new(registration));

        if previous.is_some() {
            log::warn!("⚠️ 기존 등록을 대체합니다: {}", clean_name);
        }
    }

    /// 루트 스코프에서 인스턴스를 조회합니다.
    ///
    /// # Errors
    ///
    /// - `RegistryError::NotRegistered` - 등록되지 않은 타입
    /// - `RegistryError::TypeMismatch` - 팩토리가 다른 타입을 반환한 경우
    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>, RegistryError> {
        self.resolve_in::<T>(&self.root_scope)
    }

    /// 새 스코프를 생성합니다.
    ///
    /// 웹 요청 하나, 작업 하나 등 논리적인 작업 단위마다 스코프를 만들고
    /// 작업이 끝나면 버리면 됩니다.
    pub fn create_scope(&self) -> ServiceScope<'_> {
        ServiceScope {
            registry: self,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 타입이 등록되어 있는지 확인합니다.
    pub fn contains<T: 'static>(&self) -> bool {
        self.registration(TypeId::of::<T>()).is_some()
    }

    /// 등록된 타입의 생명주기를 반환합니다.
    pub fn lifetime_of<T: 'static>(&self) -> Option<LifetimePolicy> {
        self.registration(TypeId::of::<T>()).map(|r| r.lifetime)
    }

    /// 등록된 타입 수
    pub fn len(&self) -> usize {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn registration(&self, type_id: TypeId) -> Option<Arc<Registration>> {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    fn resolve_in<T: 'static + Send + Sync>(&self, scope: &ScopeCache) -> Result<Arc<T>, RegistryError> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        let registration = self
            .registration(type_id)
            .ok_or(RegistryError::NotRegistered(type_name))?;

        let instance = match registration.lifetime {
            LifetimePolicy::PerCall => registration.create(),
            LifetimePolicy::Singleton => registration.singleton(),
            LifetimePolicy::PerScope => {
                let cached = scope
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(&type_id)
                    .filter(|(owner, _)| Arc::ptr_eq(owner, &registration))
                    .map(|(_, instance)| instance.clone());

                match cached {
                    Some(instance) => instance,
                    None => {
                        // 더블 체크: 다른 스레드가 먼저 생성했을 수 있음
                        let mut instances = scope.write().unwrap_or_else(PoisonError::into_inner);
                        let current = instances
                            .get(&type_id)
                            .filter(|(owner, _)| Arc::ptr_eq(owner, &registration))
                            .map(|(_, instance)| instance.clone());

                        match current {
                            Some(instance) => instance,
                            None => {
                                let instance = registration.create();
                                instances.insert(type_id, (registration.clone(), instance.clone()));
                                instance
                            }
                        }
                    }
                }
            }
        };

        instance
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch(type_name))
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 스코프 단위 조회 컨텍스트
///
/// `PerScope` 인스턴스는 스코프마다 하나씩 만들어지고 스코프가 drop되면 함께 해제됩니다.
pub struct ServiceScope<'r> {
    registry: &'r ServiceRegistry,
    instances: ScopeCache,
}

impl ServiceScope<'_> {
    /// 이 스코프에서 인스턴스를 조회합니다.
    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>, RegistryError> {
        self.registry.resolve_in::<T>(&self.instances)
    }
}

/// 타입 이름에서 모듈 경로를 제거합니다.
///
/// `std::any::type_name::<T>()`은 `redis_cache_client::caching::redis::CacheClient`처럼
/// 전체 경로를 반환하므로 로그에는 마지막 세그먼트만 남깁니다.
fn short_type_name(type_name: &str) -> &str {
    match type_name.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}
