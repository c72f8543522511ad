//! Transaction audit: sink port and pure in-process sinks

pub mod fanout;
pub mod memory;
pub mod ports;

pub use fanout::FanoutRecorder;
pub use memory::MemoryTransactionLog;
pub use ports::{RecorderError, TransactionRecorder};
