//! # Responsys Infrastructure
//!
//! Concrete implementations of the ports defined in `responsys-core`.
//!
//! This crate contains:
//! - the reqwest-backed HTTP exchange
//! - file and tracing audit sinks
//! - configuration loading from environment and files
//! - tracing subscriber setup
//! - [`ResponsysClient`], which wires everything from a config
//!
//! ## Architecture
//! - Implements traits defined in `responsys-core`
//! - Contains all "impure" code (network, file system, environment)

pub mod audit;
pub mod client;
pub mod config;
pub mod http;
pub mod observability;

pub use audit::{JsonLinesTransactionLog, TracingTransactionRecorder};
pub use client::ResponsysClient;
pub use http::{ReqwestExchange, ReqwestExchangeBuilder};
pub use observability::{init_tracing, LogFormat};
