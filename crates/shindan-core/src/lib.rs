pub mod booking;
pub mod error;
pub mod session;
pub mod step;
pub mod traversal;
pub mod tree;

// Re-export common error type
pub use error::{Result, ShindanError};
