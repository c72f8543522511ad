//! # Responsys Domain
//!
//! Domain types for the Responsys REST client.
//!
//! This crate contains:
//! - Wire payloads (contact merge, custom event)
//! - Audit transaction records
//! - Error types and Result definitions
//! - Configuration structures and wire constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
