//! Response-side function code dispatch: validate the response against the
//! request that produced it, split out the exception path, then hand off to
//! the matching [`super::MasterHandler`].

use crate::exception::Exception;
use crate::frame::PduView;
use crate::function::Function;
use crate::{ErrorInfo, Result};

use super::callback::{DataCallback, ExceptionCallback};
use super::{HandlerContext, MasterHandler};

pub(crate) fn dispatch_pdu(
    table: &[(Function, MasterHandler)],
    request_pdu: &[u8],
    response_pdu: &[u8],
    address: u8,
    data_callback: &mut dyn DataCallback,
    exception_callback: Option<&mut dyn ExceptionCallback>,
) -> Result<()> {
    let request = PduView::new(request_pdu).ok_or_else(ErrorInfo::bad_frame)?;
    let response = PduView::new(response_pdu).ok_or_else(ErrorInfo::response_parse_fail)?;

    if response.function().without_exception_bit() != request.function() {
        return Err(ErrorInfo::response_parse_fail());
    }

    if response.function().is_exception() {
        let payload = response.payload();
        if payload.len() != 1 {
            return Err(ErrorInfo::response_parse_fail());
        }
        if let Some(cb) = exception_callback {
            cb.on_exception(address, request.function(), Exception(payload[0]));
        }
        return Ok(());
    }

    let handler = table
        .iter()
        .find(|(code, _)| *code == request.function())
        .map(|(_, handler)| *handler)
        .ok_or_else(ErrorInfo::response_parse_fail)?;

    handler(
        request.payload(),
        response.payload(),
        HandlerContext { function: request.function(), address },
        data_callback,
    )
}
