//! Bookings service errors.

use thiserror::Error;

use crate::{domain::bookings::models::BookingStatus, store::StoreError};

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("product is missing or inactive")]
    InvalidProduct,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("partner not found")]
    UnknownPartner,

    #[error("booking not found")]
    NotFound,

    #[error("booking cannot move from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("administrator capability required")]
    Forbidden,

    #[error("storage error")]
    Storage(#[from] StoreError),
}
