use byteorder::{BigEndian, ByteOrder};

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
    if count == 0 || count > 123 || byte_count != 2 * count as usize {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    if payload.len() != 5 + byte_count {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }

    let bank = banks.holding.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    let len = bank.len();
    check_writable_range(len, |i| bank.can_write(i), start, count)?;

    for i in 0..count {
        let value = BigEndian::read_u16(&payload[5 + 2 * i as usize..7 + 2 * i as usize]);
        bank.write(start + i, value)?;
    }

    BigEndian::write_u16(&mut out[0..2], start);
    BigEndian::write_u16(&mut out[2..4], count);
    Ok(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::bank::Registers;

    #[test]
    fn writes_every_target_register() {
        let mut data = [0u16; 4];
        let mut regs = Registers::new(&mut data);
        let mut banks = Banks { holding: Some(&mut regs), ..Default::default() };
        let mut out = [0u8; 4];
        let payload = [0x00, 0x00, 0x00, 0x02, 0x04, 0x11, 0x11, 0x22, 0x22];
        let n = handle(&mut banks, &payload, &mut out).unwrap();
        assert_eq!(n, 4);
        assert_eq!(data[0], 0x1111);
        assert_eq!(data[1], 0x2222);
    }

    #[test]
    fn protected_register_leaves_bank_unchanged() {
        let mut data = [0u16; 4];
        let mask = [0b0000_0100]; // index 2 protected
        let mut regs = Registers::with_mask(&mut data, &mask);
        let mut banks = Banks { holding: Some(&mut regs), ..Default::default() };
        let mut out = [0u8; 4];
        let payload = [0x00, 0x01, 0x00, 0x03, 0x06, 0x11, 0x11, 0x22, 0x22, 0x33, 0x33];
        assert_eq!(handle(&mut banks, &payload, &mut out).unwrap_err(), exception::ILLEGAL_DATA_ADDRESS);
        assert_eq!(data, [0, 0, 0, 0]);
    }
}
