//! Ledger service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerServiceError {
    #[error("storage error")]
    Storage(#[from] StoreError),
}
