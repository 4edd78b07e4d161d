//! Cross-cutting utilities

pub mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
