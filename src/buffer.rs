//! Frame buffer abstraction: one owned allocation serves the PDU-only, RTU,
//! and TCP/MBAP entry points without ever copying the payload.
//!
//! The buffer reserves a fixed region before the PDU (`PREFIX_PAD`) and after
//! it (`SUFFIX_PAD`). The PDU is written once; the transport wrapper then
//! fills in the reserved regions and hands back a view that starts at the
//! right offset for whichever framing was requested.
//!
//! `PREFIX_PAD` is sized to the larger of what RTU and TCP need before the
//! PDU: RTU only needs the 1-byte address, but the 7-byte MBAP header
//! (transaction + protocol + length + unit) is the binding constraint.
//! `SUFFIX_PAD` covers the 2-byte RTU CRC; TCP has no trailer.

use crate::{BufferPurpose, ErrorInfo, Result};

pub const PREFIX_PAD: usize = 7;
pub const SUFFIX_PAD: usize = 2;

/// Maximum PDU length allowed by the protocol (function code + payload).
pub const MAX_PDU_LEN: usize = 253;

/// A single owned frame buffer: `PREFIX_PAD` reserved bytes, the PDU, then
/// `SUFFIX_PAD` reserved bytes.
///
/// `B` is anything that can hand out a mutable byte slice: a fixed-size
/// array for static-memory builds, or an allocator-backed buffer behind the
/// `alloc` feature.
pub struct FrameBuffer<B> {
    storage: B,
    pdu_len: usize,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Wrap `storage`, whose usable region is assumed to already be
    /// `PREFIX_PAD + pdu_len + SUFFIX_PAD` bytes or more.
    pub fn new(storage: B, pdu_len: usize) -> Self {
        FrameBuffer { storage, pdu_len }
    }

    pub fn pdu_len(&self) -> usize {
        self.pdu_len
    }

    /// Shrink the PDU length to the exact number of bytes written; used by
    /// request builders that reserve an upper bound and then write less.
    pub fn set_pdu_len(&mut self, len: usize) {
        debug_assert!(len <= self.pdu_len);
        self.pdu_len = len;
    }

    pub fn pdu(&self) -> &[u8] {
        &self.storage.as_ref()[PREFIX_PAD..PREFIX_PAD + self.pdu_len]
    }

    pub fn pdu_mut(&mut self) -> &mut [u8] {
        &mut self.storage.as_mut()[PREFIX_PAD..PREFIX_PAD + self.pdu_len]
    }

    /// The full reserved prefix region, for a transport wrapper to fill in.
    pub fn prefix_mut(&mut self) -> &mut [u8] {
        &mut self.storage.as_mut()[..PREFIX_PAD]
    }

    /// The full reserved suffix region, for a transport wrapper to fill in.
    pub fn suffix_mut(&mut self) -> &mut [u8] {
        let start = PREFIX_PAD + self.pdu_len;
        &mut self.storage.as_mut()[start..start + SUFFIX_PAD]
    }

    /// View the buffer as an RTU frame: `address(1) | PDU | CRC(2)`, taking
    /// the address byte from the last byte of the prefix region.
    pub fn rtu_frame(&self) -> &[u8] {
        let start = PREFIX_PAD - 1;
        let end = PREFIX_PAD + self.pdu_len + SUFFIX_PAD;
        &self.storage.as_ref()[start..end]
    }

    /// View the buffer as a TCP/MBAP frame: the full 7-byte header plus PDU.
    pub fn tcp_frame(&self) -> &[u8] {
        &self.storage.as_ref()[..PREFIX_PAD + self.pdu_len]
    }
}

/// The allocator contract: given how many PDU bytes the caller needs, return
/// an owned buffer with at least `PREFIX_PAD + pdu_len + SUFFIX_PAD` bytes.
///
/// This generalises the C `ModbusMasterAllocator`/slave allocator callback:
/// instead of writing through a `uint8_t **` out-pointer, the trait returns
/// an owned buffer or an [`ErrorInfo`] with [`crate::error::ErrorKind::Alloc`].
pub trait FrameAllocator {
    type Buffer: AsRef<[u8]> + AsMut<[u8]>;

    fn allocate(&mut self, purpose: BufferPurpose, pdu_len: usize) -> Result<FrameBuffer<Self::Buffer>>;
}

/// A fixed-capacity, single-slot allocator for static-memory builds: every
/// `allocate` call reuses the same inline array, failing if the requested
/// PDU would not fit.
pub struct StaticAllocator<const N: usize> {
    storage: [u8; N],
}

impl<const N: usize> StaticAllocator<N> {
    pub const fn new() -> Self {
        StaticAllocator { storage: [0u8; N] }
    }
}

impl<const N: usize> Default for StaticAllocator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameAllocator for StaticAllocator<N> {
    type Buffer = [u8; N];

    fn allocate(&mut self, _purpose: BufferPurpose, pdu_len: usize) -> Result<FrameBuffer<Self::Buffer>> {
        if PREFIX_PAD + pdu_len + SUFFIX_PAD > N || pdu_len > MAX_PDU_LEN {
            return Err(ErrorInfo::alloc_failed());
        }
        Ok(FrameBuffer::new(self.storage, pdu_len))
    }
}

#[cfg(feature = "alloc")]
pub mod heap {
    //! An `alloc`-backed allocator for hosted builds: each call allocates a
    //! fresh, appropriately-sized `Vec<u8>`.

    use super::{BufferPurpose, ErrorInfo, FrameAllocator, FrameBuffer, MAX_PDU_LEN, PREFIX_PAD, SUFFIX_PAD};
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    pub struct VecAllocator;

    impl FrameAllocator for VecAllocator {
        type Buffer = Vec<u8>;

        fn allocate(&mut self, _purpose: BufferPurpose, pdu_len: usize) -> crate::Result<FrameBuffer<Self::Buffer>> {
            if pdu_len > MAX_PDU_LEN {
                return Err(ErrorInfo::alloc_failed());
            }
            let storage = vec![0u8; PREFIX_PAD + pdu_len + SUFFIX_PAD];
            Ok(FrameBuffer::new(storage, pdu_len))
        }
    }
}
