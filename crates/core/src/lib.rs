//! # Responsys Core
//!
//! Client logic for the Responsys REST API with no concrete I/O.
//!
//! This crate contains:
//! - the transport client that sends, classifies and records requests
//! - the session that acquires and caches the auth token
//! - the contacts facade (`merge_contact`, `trigger_custom_event`)
//! - port traits for the HTTP exchange, audit sink and token source
//!
//! ## Architecture Principles
//! - Only depends on `responsys-domain`
//! - HTTP and file access live behind traits implemented in `responsys-infra`

pub mod audit;
pub mod contacts;
pub mod endpoints;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use audit::{FanoutRecorder, MemoryTransactionLog, RecorderError, TransactionRecorder};
pub use contacts::{ApiSettings, ResponsysApi};
pub use session::{AccessTokenProvider, Session};
pub use transport::{
    ApiRequest, ExchangeFailure, HttpExchange, HttpRequest, HttpResponse, TransportClient,
};
