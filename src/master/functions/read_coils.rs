use byteorder::{BigEndian, ByteOrder};

use crate::bits;
use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::register::RegisterKind;
use crate::{DataCallbackArgs, ErrorInfo, Result};

/// Upper bound on the PDU this function ever builds: function code + start(2) + count(2).
pub const REQUEST_PDU_LEN: usize = 5;

pub fn build_request(out: &mut [u8], start: u16, count: u16) -> Result<usize> {
    if count == 0 || count > 2000 {
        return Err(ErrorInfo::bad_argument());
    }
    out[0] = function::READ_COILS.0;
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
            register_kind: RegisterKind::Coil,
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
        let n = build_request(&mut out, 0, 10).unwrap();
        assert_eq!(n, 5);
        assert_eq!(out, [0x01, 0x00, 0x00, 0x00, 0x0A]);
    }

    #[test]
    fn rejects_out_of_range_count() {
        let mut out = [0u8; REQUEST_PDU_LEN];
        assert!(build_request(&mut out, 0, 0).is_err());
        assert!(build_request(&mut out, 0, 2001).is_err());
    }

    #[test]
    fn parses_response_in_order() {
        let request_payload = [0x00, 0x00, 0x00, 0x0A];
        let response_payload = [0x02, 0x55, 0x02];
        let mut seen = Vec::new();
        let mut cb = |args: DataCallbackArgs| {
            seen.push((args.index, args.value != 0));
            Ok(())
        };
        let ctx = HandlerContext { function: function::READ_COILS, address: 1 };
        parse_response(&request_payload, &response_payload, ctx, &mut cb).unwrap();
        let bits: Vec<bool> = seen.into_iter().map(|(_, v)| v).collect();
        assert_eq!(bits, [true, false, true, false, true, false, true, false, true, false]);
    }
}
