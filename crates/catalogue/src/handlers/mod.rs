pub mod authz;
pub mod error;
pub mod games;
pub mod health;
pub mod register;

pub use error::AppError;
