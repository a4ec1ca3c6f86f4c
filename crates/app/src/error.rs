use innkeeper_core::DomainError;
use innkeeper_infra::{ConfigError, StoreError};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of an application service call.
///
/// Domain failures (validation, not found, conflict) left every collection
/// untouched and the caller may correct the request and retry. Store and
/// config failures are fatal for the call: whether a multi-collection
/// operation got partway is unknown.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ServiceError::Domain(_))
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(err) => Some(err),
            _ => None,
        }
    }
}
