//! Packed 16-bit error info, carried across every engine entry point instead
//! of a thrown exception.
//!
//! A two-axis `{source, kind}` encoding: callers that only care whether a
//! cycle succeeded can match on [`ErrorSource`]; callers that want the
//! specific reason can match on [`ErrorKind`].

use core::fmt;

/// Which side of the engine produced an [`ErrorInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorSource {
    /// No error: the operation completed normally.
    None = 0,
    General = 1,
    Allocator = 2,
    RequestBuild = 3,
    ResponseParse = 4,
    Other = 5,
}

/// The specific reason behind an [`ErrorInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorKind {
    Ok = 0,
    Alloc = 1,
    IllegalFunction = 2,
    IllegalDataAddress = 3,
    IllegalDataValue = 4,
    SlaveFailure = 5,
    Other = 6,
    RequestBuildFail = 7,
    ResponseParseFail = 8,
    BadCrc = 9,
    BadFrame = 10,
    BadArgument = 11,
}

/// A packed `{source, kind}` pair returned by every fallible entry point in
/// this crate.
///
/// `ErrorInfo::ok()` is the only value with `source == ErrorSource::None`;
/// every other value represents some failure of the cycle. The packed form
/// mirrors the C `ModbusErrorInfo` 16-bit encoding ("packed" here just means
/// it is a `Copy` two-field struct cheap enough to return by value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorInfo {
    source: ErrorSource,
    kind: ErrorKind,
}

impl ErrorInfo {
    pub const fn new(source: ErrorSource, kind: ErrorKind) -> Self {
        ErrorInfo { source, kind }
    }

    pub const fn ok() -> Self {
        ErrorInfo::new(ErrorSource::None, ErrorKind::Ok)
    }

    pub const fn alloc_failed() -> Self {
        ErrorInfo::new(ErrorSource::Allocator, ErrorKind::Alloc)
    }

    pub const fn bad_frame() -> Self {
        ErrorInfo::new(ErrorSource::General, ErrorKind::BadFrame)
    }

    pub const fn bad_crc() -> Self {
        ErrorInfo::new(ErrorSource::General, ErrorKind::BadCrc)
    }

    pub const fn bad_argument() -> Self {
        ErrorInfo::new(ErrorSource::General, ErrorKind::BadArgument)
    }

    pub const fn request_build_fail() -> Self {
        ErrorInfo::new(ErrorSource::RequestBuild, ErrorKind::RequestBuildFail)
    }

    pub const fn response_parse_fail() -> Self {
        ErrorInfo::new(ErrorSource::ResponseParse, ErrorKind::ResponseParseFail)
    }

    pub fn source(&self) -> ErrorSource {
        self.source
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.source, ErrorSource::None)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modbus error: {:?} ({:?})", self.kind, self.source)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ErrorInfo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_has_none_source() {
        assert!(ErrorInfo::ok().is_ok());
        assert_eq!(ErrorInfo::ok().source(), ErrorSource::None);
        assert_eq!(ErrorInfo::ok().kind(), ErrorKind::Ok);
    }

    #[test]
    fn failures_are_not_ok() {
        assert!(!ErrorInfo::alloc_failed().is_ok());
        assert!(!ErrorInfo::bad_frame().is_ok());
        assert!(!ErrorInfo::bad_crc().is_ok());
    }
}
