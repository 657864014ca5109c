//! Exception codes as documented by
//! <https://en.wikipedia.org/wiki/Modbus#Exception_responses>

/// A one-byte Modbus exception code, sent as the second byte of an exception
/// response PDU (after the function code with its top bit set).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Exception(pub u8);

/// Function code received in the query is not recognized or allowed by the slave.
pub const ILLEGAL_FUNCTION: Exception = Exception(1);
/// Data address of some or all of the required entities is not allowed or does
/// not exist on the slave; also used for writes to a write-protected element.
pub const ILLEGAL_DATA_ADDRESS: Exception = Exception(2);
/// Value is not accepted by the slave (out-of-range count, bad coil value, ...).
pub const ILLEGAL_DATA_VALUE: Exception = Exception(3);
/// Unrecoverable error occurred while the slave was attempting to perform the
/// requested action.
pub const SLAVE_FAILURE: Exception = Exception(4);
/// Slave has accepted the request and is processing it, but a long duration of
/// time is required. Prevents a timeout on the master while work proceeds.
pub const ACKNOWLEDGE: Exception = Exception(5);
/// Slave is engaged in processing a long-duration command. Master should retry later.
pub const SLAVE_BUSY: Exception = Exception(6);
/// Slave detected a parity error in memory.
pub const MEMORY_PARITY: Exception = Exception(8);
/// Specialized for Modbus gateways: misconfigured gateway.
pub const GATEWAY_PATH: Exception = Exception(10);
/// Specialized for Modbus gateways: target device failed to respond.
pub const GATEWAY_TARGET: Exception = Exception(11);
