use byteorder::{BigEndian, ByteOrder};

use crate::exception::{self, Exception};
use crate::slave::banks::Banks;

pub fn handle(banks: &mut Banks<'_>, payload: &[u8], out: &mut [u8]) -> Result<usize, Exception> {
    if payload.len() != 4 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let index = BigEndian::read_u16(&payload[0..2]);
    let value = BigEndian::read_u16(&payload[2..4]);

    let bank = banks.holding.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    bank.write(index, value)?;

    out[..4].copy_from_slice(payload);
    Ok(4)
}
