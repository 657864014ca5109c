use byteorder::{BigEndian, ByteOrder};

use crate::exception::{self, Exception};
use crate::slave::banks::Banks;

pub fn handle(banks: &mut Banks<'_>, payload: &[u8], out: &mut [u8]) -> Result<usize, Exception> {
    if payload.len() != 6 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let index = BigEndian::read_u16(&payload[0..2]);
    let and_mask = BigEndian::read_u16(&payload[2..4]);
    let or_mask = BigEndian::read_u16(&payload[4..6]);

    let bank = banks.holding.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    if !bank.can_write(index) {
        return Err(exception::ILLEGAL_DATA_ADDRESS);
    }
    let current = bank.read(index).ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    let new_value = (current & and_mask) | (or_mask & !and_mask);
    bank.write(index, new_value)?;

    out[..6].copy_from_slice(payload);
    Ok(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::bank::Registers;

    #[test]
    fn applies_and_or_mask() {
        let mut data = [0x1234u16];
        let mut regs = Registers::new(&mut data);
        let mut banks = Banks { holding: Some(&mut regs), ..Default::default() };
        let mut out = [0u8; 6];
        // (0x1234 & 0xFF00) | (0x00FF & !0xFF00) == 0x1200 | 0x00FF == 0x12FF
        let payload = [0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF];
        let n = handle(&mut banks, &payload, &mut out).unwrap();
        assert_eq!(n, 6);
        assert_eq!(data[0], 0x12FF);
    }
}
