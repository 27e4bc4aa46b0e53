pub mod cart;
pub mod error;
pub mod health;
pub mod pages;

pub use error::AppError;
