//! Withdrawals service errors.

use thiserror::Error;

use crate::{domain::withdrawals::models::WithdrawalStatus, store::StoreError};

#[derive(Debug, Error)]
pub enum WithdrawalsServiceError {
    #[error("available balance is below the minimum withdrawal threshold")]
    InsufficientBalance,

    #[error("UPI destination is malformed")]
    InvalidDestination,

    #[error("withdrawal not found")]
    NotFound,

    #[error("withdrawal cannot move from {from} to {to}")]
    InvalidTransition {
        from: WithdrawalStatus,
        to: WithdrawalStatus,
    },

    #[error("administrator capability required")]
    Forbidden,

    #[error("storage error")]
    Storage(#[from] StoreError),
}
