//! The default master handler table: the standard mapping from function code
//! to response parser for codes 1, 2, 3, 4, 5, 6, 15, 16, 22.
//!
//! As with [`crate::slave::table::DEFAULT_SLAVE_TABLE`], lookup is
//! first-match and a caller's own table (via [`super::Master::with_table`])
//! is consulted alone — defaults are not implicitly appended.

use crate::function;

use super::functions;
use super::MasterHandler;

pub const DEFAULT_MASTER_TABLE: &[(crate::Function, MasterHandler)] = &[
    (function::READ_COILS, functions::read_coils::parse_response),
    (function::READ_DISCRETE_INPUTS, functions::read_discrete_inputs::parse_response),
    (function::READ_HOLDING_REGISTERS, functions::read_holding_registers::parse_response),
    (function::READ_INPUT_REGISTERS, functions::read_input_registers::parse_response),
    (function::WRITE_SINGLE_COIL, functions::write_single_coil::parse_response),
    (function::WRITE_SINGLE_REGISTER, functions::write_single_register::parse_response),
    (function::WRITE_MULTIPLE_COILS, functions::write_multiple_coils::parse_response),
    (function::WRITE_MULTIPLE_REGISTERS, functions::write_multiple_registers::parse_response),
    (function::MASK_WRITE_REGISTER, functions::mask_write_register::parse_response),
];
