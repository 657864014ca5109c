use byteorder::{BigEndian, ByteOrder};

use crate::bits;
use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::register::RegisterKind;
use crate::{DataCallbackArgs, ErrorInfo, Result};

pub const REQUEST_PDU_LEN: usize = 5;

pub fn build_request(out: &mut [u8], start: u16, count: u16) -> Result<usize> {
    if count == 0 || count > 2000 {
        return Err(ErrorInfo::bad_argument());
    }
    out[0] = function::READ_DISCRETE_INPUTS.0;
    BigEndian::write_u16(&mut out[1..3], start);
    BigEndian::write_u16(&mut out[3..5], count);
    Ok(REQUEST_PDU_LEN)
}

pub fn parse_response(
    request_payload: &[u8],
    response_payload: &[u8],
    ctx: HandlerContext,
    data_callback: &mut dyn DataCallback,
) -> Result<()> {
    if request_payload.len() != 4 {
        return Err(ErrorInfo::response_parse_fail());
    }
    let start = BigEndian::read_u16(&request_payload[0..2]);
    let count = BigEndian::read_u16(&request_payload[2..4]);

    if response_payload.is_empty() {
        return Err(ErrorInfo::response_parse_fail());
    }
    let byte_count = response_payload[0] as usize;
    if byte_count != bits::byte_count(count) as usize || response_payload.len() != 1 + byte_count {
        return Err(ErrorInfo::response_parse_fail());
    }

    for (i, value) in bits::unpack_bits(&response_payload[1..], count).enumerate() {
        data_callback.on_value(DataCallbackArgs {
            register_kind: RegisterKind::DiscreteInput,
            index: start + i as u16,
            value: value as u16,
            function: ctx.function,
            address: ctx.address,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_pdu() {
        let mut out = [0u8; REQUEST_PDU_LEN];
        let n = build_request(&mut out, 3, 4).unwrap();
        assert_eq!(n, 5);
        assert_eq!(out, [0x02, 0x00, 0x03, 0x00, 0x04]);
    }

    #[test]
    fn parses_response() {
        let request_payload = [0x00, 0x03, 0x00, 0x04];
        let response_payload = [0x01, 0b0000_1010];
        let mut seen = Vec::new();
        let mut cb = |args: DataCallbackArgs| {
            seen.push(args.value != 0);
            Ok(())
        };
        let ctx = HandlerContext { function: function::READ_DISCRETE_INPUTS, address: 1 };
        parse_response(&request_payload, &response_payload, ctx, &mut cb).unwrap();
        assert_eq!(seen, [false, true, false, true]);
    }
}
