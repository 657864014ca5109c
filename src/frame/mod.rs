//! Transport-independent PDU view, plus the RTU and TCP/MBAP framing layers
//! that wrap a PDU for the wire.

pub mod rtu;
pub mod tcp;

use crate::Function;

/// A read-only view over a PDU: function code byte plus the function-specific
/// payload. Transport-independent — the same view is used whether the bytes
/// arrived over RTU or TCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PduView<'b> {
    bytes: &'b [u8],
}

impl<'b> PduView<'b> {
    /// Wrap `bytes` as a PDU view without validation beyond non-emptiness.
    ///
    /// Returns `None` for an empty slice: every PDU has at least a function
    /// code byte.
    pub fn new(bytes: &'b [u8]) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(PduView { bytes })
        }
    }

    pub fn function(&self) -> Function {
        Function(self.bytes[0])
    }

    pub fn payload(&self) -> &'b [u8] {
        &self.bytes[1..]
    }

    pub fn raw_bytes(&self) -> &'b [u8] {
        self.bytes
    }
}
