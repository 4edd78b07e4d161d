//! Application services

pub mod approval;
pub mod booking;

pub use approval::ApprovalService;
pub use booking::BookingService;
