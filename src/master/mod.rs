//! Master-side protocol engine: builds requests (PDU / RTU / TCP) for each
//! standard function code and parses the matching response, driving a data
//! callback and an optional exception callback from a function-handler table.

pub mod callback;
pub mod config;
pub mod dispatch;
pub mod functions;
pub mod table;

pub use callback::{DataCallback, ExceptionCallback};
pub use config::Master;
pub use table::DEFAULT_MASTER_TABLE;

use crate::function::Function;

/// Which framing a request builder or response parser is working with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transport {
    Pdu,
    Rtu { address: u8 },
    Tcp { transaction: u16, unit: u8 },
}

/// Context handed to a [`MasterHandler`] alongside the request/response
/// payload bytes: which function code this is, and which address/unit
/// reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerContext {
    pub function: Function,
    pub address: u8,
}

/// A master-side response parser: validates `response_payload` against the
/// `request_payload` that produced it, then reports every decoded element
/// through `data_callback`.
pub type MasterHandler = fn(
    request_payload: &[u8],
    response_payload: &[u8],
    ctx: HandlerContext,
    data_callback: &mut dyn DataCallback,
) -> crate::Result<()>;
