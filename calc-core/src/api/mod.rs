pub mod client;
pub mod config;
pub mod factory;

pub use client::{ApiError, CalculationApi, FALLBACK_ERROR_MESSAGE};
pub use config::EndpointConfig;
pub use factory::{ApiFactory, ApiRegistry};
