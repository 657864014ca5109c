//! TCP/MBAP framing: `transaction(2,BE) | protocol(2,BE,=0) | length(2,BE) |
//! unit(1) | PDU(n)`. `length` counts the unit byte plus the PDU. No CRC.

use byteorder::{BigEndian, ByteOrder};

use crate::buffer::FrameBuffer;
use crate::{ErrorInfo, Result};

/// Minimum valid TCP frame length: 7-byte header + 1-byte PDU (function code).
pub const MIN_FRAME_LEN: usize = 8;
/// Maximum valid TCP frame length: 7-byte header + 253-byte PDU.
pub const MAX_FRAME_LEN: usize = 260;

/// The 7-byte MBAP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MbapHeader {
    pub transaction: u16,
    pub unit: u8,
}

/// Validate and split a TCP frame into its MBAP header and PDU slice.
pub fn parse(frame: &[u8]) -> Result<(MbapHeader, &[u8])> {
    if frame.len() < MIN_FRAME_LEN || frame.len() > MAX_FRAME_LEN {
        return Err(ErrorInfo::bad_frame());
    }
    let transaction = BigEndian::read_u16(&frame[0..2]);
    let protocol = BigEndian::read_u16(&frame[2..4]);
    let length = BigEndian::read_u16(&frame[4..6]);
    let unit = frame[6];

    if protocol != 0 {
        #[cfg(feature = "log")]
        log::debug!("mbap frame has non-zero protocol id {}", protocol);
        return Err(ErrorInfo::bad_frame());
    }
    if length as usize != frame.len() - 6 {
        #[cfg(feature = "log")]
        log::debug!("mbap length field {} does not match frame size {}", length, frame.len());
        return Err(ErrorInfo::bad_frame());
    }
    if length < 2 {
        return Err(ErrorInfo::bad_frame());
    }

    Ok((MbapHeader { transaction, unit }, &frame[7..]))
}

/// Write the MBAP header into a frame buffer whose PDU is already populated,
/// and return the finished TCP frame.
pub fn finalize<B: AsRef<[u8]> + AsMut<[u8]>>(
    buf: &mut FrameBuffer<B>,
    transaction: u16,
    unit: u8,
) -> &[u8] {
    let length = 1 + buf.pdu_len() as u16;
    let prefix = buf.prefix_mut();
    let header_start = prefix.len() - 7;
    BigEndian::write_u16(&mut prefix[header_start..], transaction);
    BigEndian::write_u16(&mut prefix[header_start + 2..], 0);
    BigEndian::write_u16(&mut prefix[header_start + 4..], length);
    prefix[header_start + 6] = unit;
    buf.tcp_frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferPurpose, FrameAllocator, StaticAllocator};

    #[test]
    fn parse_rejects_nonzero_protocol() {
        let frame = [0x00, 0x01, 0x00, 0x01, 0x00, 0x02, 0x01, 0x03, 0x01];
        assert_eq!(parse(&frame).unwrap_err(), ErrorInfo::bad_frame());
    }

    #[test]
    fn parse_rejects_mismatched_length() {
        let frame = [0x00, 0x01, 0x00, 0x00, 0x00, 0x05, 0x01, 0x03, 0x01];
        assert_eq!(parse(&frame).unwrap_err(), ErrorInfo::bad_frame());
    }

    #[test]
    fn parse_accepts_valid_frame() {
        let frame = [0x00, 0x01, 0x00, 0x00, 0x00, 0x03, 0x01, 0x03, 0x01];
        let (header, pdu) = parse(&frame).unwrap();
        assert_eq!(header.transaction, 1);
        assert_eq!(header.unit, 1);
        assert_eq!(pdu, [0x03, 0x01]);
    }

    #[test]
    fn finalize_round_trips_through_parse() {
        let mut alloc = StaticAllocator::<16>::new();
        let mut buf = alloc.allocate(BufferPurpose::Request, 2).unwrap();
        buf.pdu_mut().copy_from_slice(&[0x03, 0x01]);
        let frame = finalize(&mut buf, 0x1234, 9).to_vec();
        let (header, pdu) = parse(&frame).unwrap();
        assert_eq!(header.transaction, 0x1234);
        assert_eq!(header.unit, 9);
        assert_eq!(pdu, [0x03, 0x01]);
    }
}
