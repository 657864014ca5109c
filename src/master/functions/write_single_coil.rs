use byteorder::{BigEndian, ByteOrder};

use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::register::RegisterKind;
use crate::{DataCallbackArgs, ErrorInfo, Result};

const COIL_ON: u16 = 0xFF00;
const COIL_OFF: u16 = 0x0000;

pub const REQUEST_PDU_LEN: usize = 5;

pub fn build_request(out: &mut [u8], index: u16, value: bool) -> Result<usize> {
    out[0] = function::WRITE_SINGLE_COIL.0;
    BigEndian::write_u16(&mut out[1..3], index);
    BigEndian::write_u16(&mut out[3..5], if value { COIL_ON } else { COIL_OFF });
    Ok(REQUEST_PDU_LEN)
}

/// The response echoes the request; a master learns nothing new from it but
/// a mismatched echo means the wrong thing was acknowledged.
pub fn parse_response(
    request_payload: &[u8],
    response_payload: &[u8],
    ctx: HandlerContext,
    data_callback: &mut dyn DataCallback,
) -> Result<()> {
    if request_payload != response_payload || request_payload.len() != 4 {
        return Err(ErrorInfo::response_parse_fail());
    }
    let index = BigEndian::read_u16(&response_payload[0..2]);
    let value = BigEndian::read_u16(&response_payload[2..4]);

    data_callback.on_value(DataCallbackArgs {
        register_kind: RegisterKind::Coil,
        index,
        value,
        function: ctx.function,
        address: ctx.address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_on_and_off() {
        let mut out = [0u8; REQUEST_PDU_LEN];
        build_request(&mut out, 3, true).unwrap();
        assert_eq!(out, [0x05, 0x00, 0x03, 0xFF, 0x00]);
        build_request(&mut out, 3, false).unwrap();
        assert_eq!(out, [0x05, 0x00, 0x03, 0x00, 0x00]);
    }

    #[test]
    fn rejects_echo_mismatch() {
        let request_payload = [0x00, 0x03, 0xFF, 0x00];
        let response_payload = [0x00, 0x03, 0x00, 0x00];
        let ctx = HandlerContext { function: function::WRITE_SINGLE_COIL, address: 1 };
        let mut cb = |_: DataCallbackArgs| Ok(());
        assert!(parse_response(&request_payload, &response_payload, ctx, &mut cb).is_err());
    }
}
