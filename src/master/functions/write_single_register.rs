use byteorder::{BigEndian, ByteOrder};

use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::register::RegisterKind;
use crate::{DataCallbackArgs, ErrorInfo, Result};

pub const REQUEST_PDU_LEN: usize = 5;

pub fn build_request(out: &mut [u8], index: u16, value: u16) -> Result<usize> {
    out[0] = function::WRITE_SINGLE_REGISTER.0;
    BigEndian::write_u16(&mut out[1..3], index);
    BigEndian::write_u16(&mut out[3..5], value);
    Ok(REQUEST_PDU_LEN)
}

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
        register_kind: RegisterKind::HoldingRegister,
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
    fn builds_request_pdu() {
        let mut out = [0u8; REQUEST_PDU_LEN];
        build_request(&mut out, 5, 0x1234).unwrap();
        assert_eq!(out, [0x06, 0x00, 0x05, 0x12, 0x34]);
    }

    #[test]
    fn accepts_matching_echo() {
        let payload = [0x00, 0x05, 0x12, 0x34];
        let ctx = HandlerContext { function: function::WRITE_SINGLE_REGISTER, address: 1 };
        let mut seen = None;
        let mut cb = |args: DataCallbackArgs| {
            seen = Some((args.index, args.value));
            Ok(())
        };
        parse_response(&payload, &payload, ctx, &mut cb).unwrap();
        assert_eq!(seen, Some((5, 0x1234)));
    }
}
