//! HTTP API modules

pub mod auth;
pub mod bookings;
pub mod health;
pub mod metrics;
pub mod registrations;
pub mod request_id;
pub mod stations;
