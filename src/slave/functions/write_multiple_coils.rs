use byteorder::{BigEndian, ByteOrder};

use crate::bits;
use crate::exception::{self, Exception};
use crate::register::check_writable_range;
use crate::slave::banks::Banks;

pub fn handle(banks: &mut Banks<'_>, payload: &[u8], out: &mut [u8]) -> Result<usize, Exception> {
    if payload.len() < 5 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let start = BigEndian::read_u16(&payload[0..2]);
    let count = BigEndian::read_u16(&payload[2..4]);
    let byte_count = payload[4] as usize;
    if count == 0 || count > 1968 || byte_count != bits::byte_count(count) as usize {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    if payload.len() != 5 + byte_count {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }

    let bank = banks.coils.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    let len = bank.len();
    check_writable_range(len, |i| bank.can_write(i), start, count)?;

    for (i, value) in bits::unpack_bits(&payload[5..], count).enumerate() {
        bank.write(start + i as u16, value)?;
    }

    BigEndian::write_u16(&mut out[0..2], start);
    BigEndian::write_u16(&mut out[2..4], count);
    Ok(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::bank::Coils;

    #[test]
    fn matches_worked_scenario() {
        let mut data = [0u8; 2];
        let mut coils = Coils::new(&mut data, 10);
        let mut banks = Banks { coils: Some(&mut coils), ..Default::default() };
        let mut out = [0u8; 4];
        let payload = [0x00, 0x00, 0x00, 0x0A, 0x02, 0x55, 0x02];
        let n = handle(&mut banks, &payload, &mut out).unwrap();
        assert_eq!(n, 4);
        assert_eq!(out, [0x00, 0x00, 0x00, 0x0A]);
        assert_eq!(data, [0x55, 0x02]);
    }

    #[test]
    fn protected_element_blocks_entire_write() {
        let mut data = [0u8; 1];
        let mask = [0b0000_0100]; // index 2 protected
        let mut coils = Coils::with_mask(&mut data, 8, &mask);
        let mut banks = Banks { coils: Some(&mut coils), ..Default::default() };
        let mut out = [0u8; 4];
        let payload = [0x00, 0x00, 0x00, 0x04, 0x01, 0b0000_1111];
        assert_eq!(handle(&mut banks, &payload, &mut out).unwrap_err(), exception::ILLEGAL_DATA_ADDRESS);
        assert_eq!(data, [0u8]);
    }
}
