//! Station endpoints: public discovery plus admin management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
