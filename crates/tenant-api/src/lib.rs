//! # Tenant API
//! 
//! HTTP handlers, DTOs, and the router of the tenant service.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
