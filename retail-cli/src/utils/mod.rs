//! Shared Utilities

pub mod error;
pub mod logger;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
