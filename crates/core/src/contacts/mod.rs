//! Contact merge and custom event operations

pub mod service;

pub use service::{ApiSettings, ResponsysApi};
