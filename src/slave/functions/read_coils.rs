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
    let bank = banks.coils.as_mut().ok_or(exception::ILLEGAL_DATA_ADDRESS)?;
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
    use crate::register::bank::Coils;

    #[test]
    fn reads_back_written_pattern() {
        let mut data = [0b0101_0101u8, 0b0000_0010];
        let mut coils = Coils::new(&mut data, 10);
        let mut banks = Banks { coils: Some(&mut coils), ..Default::default() };
        let mut out = [0u8; 4];
        let n = handle(&mut banks, &[0x00, 0x00, 0x00, 0x0A], &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&out[..3], [0x02, 0x55, 0x02]);
    }

    #[test]
    fn rejects_out_of_range() {
        let mut data = [0u8; 1];
        let mut coils = Coils::new(&mut data, 4);
        let mut banks = Banks { coils: Some(&mut coils), ..Default::default() };
        let mut out = [0u8; 4];
        assert_eq!(
            handle(&mut banks, &[0x00, 0x00, 0x00, 0x05], &mut out).unwrap_err(),
            exception::ILLEGAL_DATA_ADDRESS
        );
    }
}
