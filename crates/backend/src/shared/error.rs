use axum::http::StatusCode;
use thiserror::Error;

/// Ошибки репозитория записей
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Запись с таким ID отсутствует (или ID не разобрался)
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// HTTP-статус для ответа API
    pub fn status_code(&self) -> StatusCode {
        match self {
            RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;
