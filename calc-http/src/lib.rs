mod client;
mod factory;

pub use client::HttpCalculationApi;
pub use factory::HttpApiFactory;
