//! Transaction audit sinks with real I/O

pub mod jsonl;
pub mod tracing_sink;

pub use jsonl::JsonLinesTransactionLog;
pub use tracing_sink::TracingTransactionRecorder;
