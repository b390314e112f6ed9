//! Acuity
//!
//! The core of a partner loyalty program: optometrist partners submit
//! product sale bookings, an administrator reviews them, approved bookings
//! accrue reward points, and partners redeem points for cash over UPI.
//! Storage and notification delivery are external collaborators reached
//! through the traits in [`store`] and [`notify`].

pub mod config;
pub mod domain;
pub mod notify;
pub mod store;
pub mod uuids;

#[cfg(test)]
mod test;
