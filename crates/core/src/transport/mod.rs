//! Request transport: raw exchange port plus the validating client

pub mod client;
pub mod ports;

pub use client::{ApiRequest, TransportClient};
pub use ports::{ExchangeFailure, HttpExchange, HttpRequest, HttpResponse};
