//! Token acquisition and reuse

pub mod ports;
pub mod service;

pub use ports::AccessTokenProvider;
pub use service::Session;
