//! First-match function code dispatch against a slave's handler table.

use crate::exception::{self, Exception};
use crate::function::Function;

use super::banks::Banks;

/// A slave-side function handler: reads `payload` (the PDU bytes after the
/// function code) against the configured banks, writes the response payload
/// into `out` (space for the PDU bytes after the response function code),
/// and returns how many bytes it wrote, or the exception to report.
pub type SlaveHandler = for<'b> fn(&mut Banks<'b>, &[u8], &mut [u8]) -> Result<usize, Exception>;

pub(crate) fn dispatch(
    banks: &mut Banks<'_>,
    table: &[(Function, SlaveHandler)],
    function: Function,
    payload: &[u8],
    out: &mut [u8],
) -> Result<usize, Exception> {
    for (code, handler) in table {
        if *code == function {
            return handler(banks, payload, out);
        }
    }
    #[cfg(feature = "log")]
    log::debug!("no handler registered for function {:?}", function);
    Err(exception::ILLEGAL_FUNCTION)
}
