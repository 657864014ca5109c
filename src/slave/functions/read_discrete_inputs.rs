use byteorder::{BigEndian, ByteOrder};

use crate::bits;
use crate::exception::{self, Exception};
use crate::slave::banks::Banks;

pub fn handle(banks: &mut Banks<'_>, payload: &[u8], out: &mut [u8]) -> Result<usize, Exception> {
    if payload.len() != 4 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let start = BigEndian::read_u16(&payload[0..2]);
    let count = BigEndian::read_u16(&payload[2..4]);
    if count == 0 || count > 2000 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let bank = banks.discrete.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    let end = start.checked_add(count).ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    if end > bank.len() {
        return Err(exception::ILLEGAL_DATA_ADDRESS);
    }

    let byte_count = bits::byte_count(count) as usize;
    if 1 + byte_count > out.len() {
        return Err(exception::SLAVE_FAILURE);
    }
    out[0] = byte_count as u8;
    for b in &mut out[1..1 + byte_count] {
        *b = 0;
    }
    for i in 0..count {
        if bank.read(start + i).unwrap_or(false) {
            out[1 + (i as usize / 8)] |= 1 << (i % 8);
        }
    }
    Ok(1 + byte_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::bank::ReadOnlyCoils;

    #[test]
    fn reads_input_bits() {
        let data = [0b0000_0001u8];
        let mut discrete = ReadOnlyCoils::new(&data, 4);
        let mut banks = Banks { discrete: Some(&mut discrete), ..Default::default() };
        let mut out = [0u8; 4];
        let n = handle(&mut banks, &[0x00, 0x00, 0x00, 0x04], &mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&out[..2], [0x01, 0x01]);
    }
}
