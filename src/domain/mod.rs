//! Acuity Domain Concerns

pub mod bookings;
pub mod catalog;
pub mod ledger;
pub mod partners;
pub mod withdrawals;
