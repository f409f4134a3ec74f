// Service-level errors shared by all use cases
use crate::domain::error::{AnalyticsError, ValidationError};
use crate::domain::plant::PlantId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Plant not found")]
    PlantNotFound(PlantId),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
