//! Function codes as documented by
//! <https://en.wikipedia.org/wiki/Modbus#Available_function/command_codes>

/// Function code specifying how a device should process a frame.
///
/// The top bit is set on a response to indicate an exception, so a request's
/// function code is always in the range 0-127.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Function(pub u8);

impl Function {
    /// `true` if the top bit is set, i.e. this is the function code of an
    /// exception response.
    pub fn is_exception(&self) -> bool {
        self.0 & 0x80 != 0
    }

    /// The function code with the exception bit cleared.
    pub fn without_exception_bit(&self) -> Function {
        Function(self.0 & 0x7F)
    }

    /// The function code with the exception bit set.
    pub fn with_exception_bit(&self) -> Function {
        Function(self.0 | 0x80)
    }
}

impl From<u8> for Function {
    fn from(f: u8) -> Self {
        Function(f)
    }
}

impl From<Function> for u8 {
    fn from(f: Function) -> Self {
        f.0
    }
}

/// Request:
///     Address of first coil to read (16-bit)
///     Number of coils to read (16-bit)
///
/// Normal response:
///     Number of bytes of coil values to follow (8-bit)
///     Coil values (8 coils per byte)
pub const READ_COILS: Function = Function(1);

/// Request:
///     Address of first discrete input to read (16-bit)
///     Number of discrete inputs to read (16-bit)
///
/// Normal response:
///     Number of bytes of discrete input values to follow (8-bit)
///     Discrete input values (8 per byte)
pub const READ_DISCRETE_INPUTS: Function = Function(2);

/// Request:
///    Address of first register to read (16-bit)
///    Number of registers to read (16-bit)
///
/// Normal response:
///    Number of bytes of register values to follow (8-bit)
///    Register values (16 bits per register, big-endian)
pub const READ_HOLDING_REGISTERS: Function = Function(3);

/// Request/response layout identical to `READ_HOLDING_REGISTERS`, against the
/// read-only input register bank.
pub const READ_INPUT_REGISTERS: Function = Function(4);

/// Request:
///     Address of coil (16-bit)
///     Value to force: 0x0000 (off) or 0xFF00 (on)
///
/// Normal response: echoes the request.
pub const WRITE_SINGLE_COIL: Function = Function(5);

/// Request:
///    Address of holding register to write (16-bit)
///    New value (16-bit)
///
/// Normal response: echoes the request.
pub const WRITE_SINGLE_REGISTER: Function = Function(6);

/// Request:
///    Address of first coil to write (16-bit)
///    Number of coils to write (16-bit)
///    Number of bytes of coil values to follow (8-bit)
///    Coil values (8 per byte, LSB first)
///
/// Normal response:
///    Address of first coil (16-bit)
///    Number of coils written (16-bit)
pub const WRITE_MULTIPLE_COILS: Function = Function(15);

/// Request:
///    Address of first holding register to write (16-bit)
///    Number of holding registers to write (16-bit)
///    Number of bytes of register values to follow (8-bit)
///    New values (16 bits per register, big-endian)
///
/// Normal response:
///    Address of first register written (16-bit)
///    Number of registers written (16-bit)
pub const WRITE_MULTIPLE_REGISTERS: Function = Function(16);

/// Request:
///    Address of holding register (16-bit)
///    AND mask (16-bit)
///    OR mask (16-bit)
///
/// New value = (current AND and_mask) OR (or_mask AND NOT and_mask).
///
/// Normal response: echoes the request.
pub const MASK_WRITE_REGISTER: Function = Function(22);
