//! RTU framing: `address(1) | PDU(n) | CRC-lo(1) | CRC-hi(1)`.
//!
//! The CRC covers the address byte and the PDU. Address 0 is the broadcast
//! address: every slave consumes a broadcast frame, but none reply.

use crate::buffer::FrameBuffer;
use crate::crc::{calculate_crc16, verify_crc16};
use crate::{ErrorInfo, Result};

pub const BROADCAST_ADDRESS: u8 = 0;

/// Minimum valid RTU frame length: address + function code + 2 CRC bytes.
pub const MIN_FRAME_LEN: usize = 4;
/// Maximum valid RTU frame length: 1 address + 253 PDU + 2 CRC.
pub const MAX_FRAME_LEN: usize = 256;

/// Validate and split an RTU frame into its address byte and PDU slice.
///
/// Checks length bounds and the trailing CRC; does not interpret the PDU.
pub fn parse(frame: &[u8]) -> Result<(u8, &[u8])> {
    if frame.len() < MIN_FRAME_LEN || frame.len() > MAX_FRAME_LEN {
        return Err(ErrorInfo::bad_frame());
    }
    if !verify_crc16(frame) {
        #[cfg(feature = "log")]
        log::debug!("rtu frame failed crc check, len={}", frame.len());
        return Err(ErrorInfo::bad_crc());
    }
    let pdu_end = frame.len() - 2;
    Ok((frame[0], &frame[1..pdu_end]))
}

/// Write the address byte and trailing CRC into a frame buffer whose PDU is
/// already populated, and return the finished RTU frame.
pub fn finalize<B: AsRef<[u8]> + AsMut<[u8]>>(buf: &mut FrameBuffer<B>, address: u8) -> &[u8] {
    let pdu_len = buf.pdu_len();
    buf.prefix_mut()[crate::buffer::PREFIX_PAD - 1] = address;
    let crc = {
        // CRC covers address + PDU, which are contiguous in rtu_frame() minus
        // the trailing CRC bytes themselves.
        let frame = buf.rtu_frame();
        calculate_crc16(&frame[..1 + pdu_len])
    };
    buf.suffix_mut()[..2].copy_from_slice(&crc.to_le_bytes());
    buf.rtu_frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferPurpose, FrameAllocator, StaticAllocator};

    #[test]
    fn parse_rejects_short_frame() {
        assert_eq!(parse(&[1, 2, 3]).unwrap_err(), ErrorInfo::bad_frame());
    }

    #[test]
    fn parse_rejects_bad_crc() {
        let frame = [0x11, 0x03, 0x00, 0x6B, 0x00, 0x03, 0x00, 0x00];
        assert_eq!(parse(&frame).unwrap_err(), ErrorInfo::bad_crc());
    }

    #[test]
    fn parse_accepts_valid_frame() {
        let frame = [0x11, 0x03, 0x00, 0x6B, 0x00, 0x03, 0x76, 0x87];
        let (address, pdu) = parse(&frame).unwrap();
        assert_eq!(address, 0x11);
        assert_eq!(pdu, [0x03, 0x00, 0x6B, 0x00, 0x03]);
    }

    #[test]
    fn finalize_matches_known_vector() {
        // read holding registers, start=1, count=2, address=7
        let mut alloc = StaticAllocator::<16>::new();
        let mut buf = alloc.allocate(BufferPurpose::Request, 5).unwrap();
        buf.pdu_mut().copy_from_slice(&[0x03, 0x00, 0x01, 0x00, 0x02]);
        let frame = finalize(&mut buf, 7);
        assert_eq!(frame, [0x07, 0x03, 0x00, 0x01, 0x00, 0x02, 0x95, 0x59]);
    }
}
