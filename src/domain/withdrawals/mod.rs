//! Withdrawals

pub mod errors;
pub mod models;
pub mod service;

pub use errors::WithdrawalsServiceError;
pub use service::*;
