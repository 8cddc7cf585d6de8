pub mod app;
pub mod engine;
pub mod error;
pub mod platform;

pub use error::GenError;
