//! The default slave handler table: the standard mapping from function code
//! to request handler for codes 1, 2, 3, 4, 5, 6, 15, 16, 22.
//!
//! Lookup in [`super::dispatch::dispatch`] is first-match, so a caller who
//! wants to override or extend this can supply their own table via
//! [`super::Slave::with_table`] — defaults are not implicitly appended.

use crate::function;

use super::dispatch::SlaveHandler;
use super::functions;

pub const DEFAULT_SLAVE_TABLE: &[(crate::Function, SlaveHandler)] = &[
    (function::READ_COILS, functions::read_coils::handle),
    (function::READ_DISCRETE_INPUTS, functions::read_discrete_inputs::handle),
    (function::READ_HOLDING_REGISTERS, functions::read_holding_registers::handle),
    (function::READ_INPUT_REGISTERS, functions::read_input_registers::handle),
    (function::WRITE_SINGLE_COIL, functions::write_single_coil::handle),
    (function::WRITE_SINGLE_REGISTER, functions::write_single_register::handle),
    (function::WRITE_MULTIPLE_COILS, functions::write_multiple_coils::handle),
    (function::WRITE_MULTIPLE_REGISTERS, functions::write_multiple_registers::handle),
    (function::MASK_WRITE_REGISTER, functions::mask_write_register::handle),
];
