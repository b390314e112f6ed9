//! Partners

pub mod models;
