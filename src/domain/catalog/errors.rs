//! Catalog service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("reward specification is out of range")]
    InvalidReward,

    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for CatalogServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateKey => Self::AlreadyExists,
            StoreError::Backend(_) => Self::Storage(error),
        }
    }
}
