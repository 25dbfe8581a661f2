//! # Tenant Shared
//! 
//! Configuration, telemetry, and small utilities shared by the tenant service crates.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
