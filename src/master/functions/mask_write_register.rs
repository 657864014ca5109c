use byteorder::{BigEndian, ByteOrder};

use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::register::RegisterKind;
use crate::{DataCallbackArgs, ErrorInfo, Result};

pub const REQUEST_PDU_LEN: usize = 7;

pub fn build_request(out: &mut [u8], index: u16, and_mask: u16, or_mask: u16) -> Result<usize> {
    out[0] = function::MASK_WRITE_REGISTER.0;
    BigEndian::write_u16(&mut out[1..3], index);
    BigEndian::write_u16(&mut out[3..5], and_mask);
    BigEndian::write_u16(&mut out[5..7], or_mask);
    Ok(REQUEST_PDU_LEN)
}

/// The response echoes the request verbatim; there is no single "new value"
/// on the wire to report (the master would need its own copy of the
/// register's prior value to compute one), so this only validates the echo.
pub fn parse_response(
    request_payload: &[u8],
    response_payload: &[u8],
    ctx: HandlerContext,
    data_callback: &mut dyn DataCallback,
) -> Result<()> {
    if request_payload != response_payload || request_payload.len() != 6 {
        return Err(ErrorInfo::response_parse_fail());
    }
    let index = BigEndian::read_u16(&response_payload[0..2]);
    let and_mask = BigEndian::read_u16(&response_payload[2..4]);
    let or_mask = BigEndian::read_u16(&response_payload[4..6]);

    // Report the masks as the "value" pair a caller can recompute the new
    // register contents from, keyed to the same register index.
    data_callback.on_value(DataCallbackArgs {
        register_kind: RegisterKind::HoldingRegister,
        index,
        value: and_mask,
        function: ctx.function,
        address: ctx.address,
    })?;
    data_callback.on_value(DataCallbackArgs {
        register_kind: RegisterKind::HoldingRegister,
        index,
        value: or_mask,
        function: ctx.function,
        address: ctx.address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_pdu() {
        let mut out = [0u8; REQUEST_PDU_LEN];
        build_request(&mut out, 4, 0xFF00, 0x00FF).unwrap();
        assert_eq!(out, [0x16, 0x00, 0x04, 0xFF, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn rejects_echo_mismatch() {
        let request_payload = [0x00, 0x04, 0xFF, 0x00, 0x00, 0xFF];
        let response_payload = [0x00, 0x04, 0xFF, 0x00, 0x00, 0x00];
        let ctx = HandlerContext { function: function::MASK_WRITE_REGISTER, address: 1 };
        let mut cb = |_: DataCallbackArgs| Ok(());
        assert!(parse_response(&request_payload, &response_payload, ctx, &mut cb).is_err());
    }
}
