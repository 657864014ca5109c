//! One module per standard function code, each pairing a request builder
//! (writes a PDU given the semantic arguments) with a response parser
//! matching [`super::MasterHandler`].
//!
//! The builder and parser live side by side because they are the two halves
//! of the same wire contract: the parser decodes exactly what the builder's
//! companion slave-side handler (see [`crate::slave::functions`]) is
//! expected to have produced.

pub mod mask_write_register;
pub mod read_coils;
pub mod read_discrete_inputs;
pub mod read_holding_registers;
pub mod read_input_registers;
pub mod write_multiple_coils;
pub mod write_multiple_registers;
pub mod write_single_coil;
pub mod write_single_register;
