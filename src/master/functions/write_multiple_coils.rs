use byteorder::{BigEndian, ByteOrder};

use crate::bits;
use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::{ErrorInfo, Result};

/// Upper bound on the PDU this function builds for `count` coils: function
/// code + start(2) + count(2) + byte-count(1) + packed bits.
pub fn request_pdu_len(count: u16) -> usize {
    6 + bits::byte_count(count) as usize
}

pub fn build_request(out: &mut [u8], start: u16, count: u16, values: impl IntoIterator<Item = bool>) -> Result<usize> {
    if count == 0 || count > 1968 {
        return Err(ErrorInfo::bad_argument());
    }
    let byte_count = bits::byte_count(count) as usize;
    out[0] = function::WRITE_MULTIPLE_COILS.0;
    BigEndian::write_u16(&mut out[1..3], start);
    BigEndian::write_u16(&mut out[3..5], count);
    out[5] = byte_count as u8;
    out[6..6 + byte_count].fill(0);
    let written = bits::pack_bits(values, &mut out[6..6 + byte_count]);
    if written != count as usize {
        return Err(ErrorInfo::bad_argument());
    }
    Ok(5 + 1 + byte_count)
}

/// The response only echoes start/count (no per-element values on the
/// wire), so there is nothing for the data callback to report — this just
/// validates the echo matches what was requested.
pub fn parse_response(
    request_payload: &[u8],
    response_payload: &[u8],
    _ctx: HandlerContext,
    _data_callback: &mut dyn DataCallback,
) -> Result<()> {
    if request_payload.len() < 4 || response_payload.len() != 4 {
        return Err(ErrorInfo::response_parse_fail());
    }
    if request_payload[0..4] != response_payload[0..4] {
        return Err(ErrorInfo::response_parse_fail());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_worked_scenario() {
        // write multiple coils, bit pattern 0b01010101, 0b00000010
        let bits = [true, false, true, false, true, false, true, false, true, false];
        let mut out = [0u8; 8];
        let n = build_request(&mut out, 0, 10, bits.iter().copied()).unwrap();
        assert_eq!(n, 8);
        assert_eq!(out, [0x0F, 0x00, 0x00, 0x00, 0x0A, 0x02, 0x55, 0x02]);

        let request_payload = &out[1..8];
        let response_payload = [0x00, 0x00, 0x00, 0x0A];
        let ctx = HandlerContext { function: function::WRITE_MULTIPLE_COILS, address: 1 };
        let mut cb = |_: crate::DataCallbackArgs| Ok(());
        parse_response(request_payload, &response_payload, ctx, &mut cb).unwrap();
    }

    #[test]
    fn rejects_mismatched_echo() {
        let request_payload = [0x00, 0x00, 0x00, 0x0A, 0x02, 0x55, 0x02];
        let response_payload = [0x00, 0x00, 0x00, 0x09];
        let ctx = HandlerContext { function: function::WRITE_MULTIPLE_COILS, address: 1 };
        let mut cb = |_: crate::DataCallbackArgs| Ok(());
        assert!(parse_response(&request_payload, &response_payload, ctx, &mut cb).is_err());
    }
}
