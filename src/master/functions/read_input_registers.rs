use byteorder::{BigEndian, ByteOrder};

use crate::function;
use crate::master::callback::DataCallback;
use crate::master::HandlerContext;
use crate::register::RegisterKind;
use crate::{DataCallbackArgs, ErrorInfo, Result};

pub const REQUEST_PDU_LEN: usize = 5;

pub fn build_request(out: &mut [u8], start: u16, count: u16) -> Result<usize> {
    if count == 0 || count > 125 {
        return Err(ErrorInfo::bad_argument());
    }
    out[0] = function::READ_INPUT_REGISTERS.0;
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
    if byte_count != 2 * count as usize || response_payload.len() != 1 + byte_count {
        return Err(ErrorInfo::response_parse_fail());
    }

    for i in 0..count {
        let value = BigEndian::read_u16(&response_payload[1 + 2 * i as usize..3 + 2 * i as usize]);
        data_callback.on_value(DataCallbackArgs {
            register_kind: RegisterKind::InputRegister,
            index: start + i,
            value,
            function: ctx.function,
            address: ctx.address,
        })?;
    }
    Ok(())
}
