#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
// this crate is intended for use in both hosted and embedded contexts. Allocation is opt-in via the
// `alloc`/`std` features; the default build performs no allocation at all.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod bits;
pub mod buffer;
pub mod crc;
pub mod error;
pub mod exception;
pub mod frame;
pub mod function;
pub mod master;
pub mod register;
pub mod slave;

pub use error::ErrorInfo;
pub use exception::Exception;
pub use function::Function;

/// Result alias used throughout the engine: every entry point returns packed
/// error info rather than panicking or throwing.
pub type Result<T> = core::result::Result<T, ErrorInfo>;

/// Which of the two peer roles requested a frame buffer from an allocator.
///
/// The allocator is free to size or pool request/response buffers
/// differently depending on which purpose is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferPurpose {
    Request,
    Response,
}

/// One register/coil value reported to a master's data callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataCallbackArgs {
    pub register_kind: register::RegisterKind,
    pub index: u16,
    pub value: u16,
    pub function: Function,
    pub address: u8,
}
