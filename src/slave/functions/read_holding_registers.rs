use byteorder::{BigEndian, ByteOrder};

use crate::exception::{self, Exception};
use crate::slave::banks::Banks;

pub fn handle(banks: &mut Banks<'_>, payload: &[u8], out: &mut [u8]) -> Result<usize, Exception> {
    if payload.len() != 4 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let start = BigEndian::read_u16(&payload[0..2]);
    let count = BigEndian::read_u16(&payload[2..4]);
    if count == 0 || count > 125 {
        return Err(exception::ILLEGAL_DATA_VALUE);
    }
    let bank = banks.holding.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    let end = start.checked_add(count).ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
    if end > bank.len() {
        return Err(exception::ILLEGAL_DATA_ADDRESS);
    }

    let byte_count = 2 * count as usize;
    if 1 + byte_count > out.len() {
        return Err(exception::SLAVE_FAILURE);
    }
    out[0] = byte_count as u8;
    for i in 0..count {
        let value = bank.read(start + i).unwrap_or(0);
        BigEndian::write_u16(&mut out[1 + 2 * i as usize..3 + 2 * i as usize], value);
    }
    Ok(1 + byte_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::bank::Registers;

    #[test]
    fn matches_worked_scenario() {
        let mut data = [0x1111u16, 0x2222, 0x3333, 0x4444];
        let mut regs = Registers::new(&mut data);
        let mut banks = Banks { holding: Some(&mut regs), ..Default::default() };
        let mut out = [0u8; 8];
        let n = handle(&mut banks, &[0x00, 0x01, 0x00, 0x02], &mut out).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&out[..5], [0x04, 0x22, 0x22, 0x33, 0x33]);
    }
}
