use byteorder::{BigEndian, ByteOrder};

use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::{ErrorInfo, Result};

/// Upper bound on the PDU this function builds for `count` registers:
/// function code + start(2) + count(2) + byte-count(1) + 2 bytes/register.
pub fn request_pdu_len(count: u16) -> usize {
    5 + 1 + 2 * count as usize
}

pub fn build_request(out: &mut [u8], start: u16, values: &[u16]) -> Result<usize> {
    let count = values.len();
    if count == 0 || count > 123 {
        return Err(ErrorInfo::bad_argument());
    }
    let byte_count = 2 * count;
    out[0] = function::WRITE_MULTIPLE_REGISTERS.0;
    BigEndian::write_u16(&mut out[1..3], start);
    BigEndian::write_u16(&mut out[3..5], count as u16);
    out[5] = byte_count as u8;
    for (i, value) in values.iter().enumerate() {
        BigEndian::write_u16(&mut out[6 + 2 * i..8 + 2 * i], *value);
    }
    Ok(5 + 1 + byte_count)
}

/// As with [`super::write_multiple_coils`], the response only echoes
/// start/count — nothing new reaches the data callback here.
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
    fn builds_request_pdu() {
        let values = [0x1111u16, 0x2222, 0x3333];
        let mut out = [0u8; 12];
        let n = build_request(&mut out, 0, &values).unwrap();
        assert_eq!(n, 12);
        assert_eq!(
            out,
            [0x10, 0x00, 0x00, 0x00, 0x03, 0x06, 0x11, 0x11, 0x22, 0x22, 0x33, 0x33]
        );
    }

    #[test]
    fn accepts_matching_echo() {
        let payload = [0x00, 0x00, 0x00, 0x03];
        let ctx = HandlerContext { function: function::WRITE_MULTIPLE_REGISTERS, address: 1 };
        let mut cb = |_: crate::DataCallbackArgs| Ok(());
        parse_response(&payload, &payload, ctx, &mut cb).unwrap();
    }

    #[test]
    fn rejects_oversized_count() {
        let values = [0u16; 124];
        let mut out = [0u8; 260];
        assert!(build_request(&mut out, 0, &values).is_err());
    }
}
