//! Slave-side protocol engine: parses master requests (PDU / RTU / TCP),
//! dispatches to per-function-code handlers against the configured register
//! and coil banks, and composes a response or exception frame.

pub mod banks;
pub mod config;
pub mod dispatch;
pub mod functions;
pub mod table;

pub use banks::Banks;
pub use config::Slave;
pub use dispatch::SlaveHandler;
pub use table::DEFAULT_SLAVE_TABLE;
