//! Business logic: services and the discovery view

pub mod discovery;
pub mod services;

pub use discovery::{filter_and_sort, SortKey, StationFilter, StationView};
pub use services::{ApprovalService, BookingService};
