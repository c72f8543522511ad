//! HTTP exchange backed by reqwest

pub mod client;

pub use client::{ReqwestExchange, ReqwestExchangeBuilder};
