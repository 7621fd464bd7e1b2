pub mod error;
pub mod runtime;
pub mod scorecard;

pub use error::AppError;
