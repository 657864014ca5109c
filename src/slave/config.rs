//! The slave instance: address, banks, handler table, and the request/response
//! cycle built on top of [`crate::buffer::FrameAllocator`].

use crate::buffer::{FrameAllocator, FrameBuffer};
use crate::exception::Exception;
use crate::frame::{self, PduView};
use crate::function::Function;
use crate::register::{CoilRead, CoilWrite, RegisterRead, RegisterWrite};
use crate::{BufferPurpose, ErrorInfo, Result};

use super::banks::Banks;
use super::dispatch::{self, SlaveHandler};
use super::table::DEFAULT_SLAVE_TABLE;

enum ResponseView {
    None,
    Pdu,
    Rtu,
    Tcp,
}

/// A Modbus slave: owns its address, its register/coil banks, a response
/// allocator, and a function handler table.
///
/// Reused across any number of `parse_request_*` cycles; each call discards
/// the previous response before composing the next one.
pub struct Slave<'a, A: FrameAllocator, Ctx = ()> {
    address: u8,
    allocator: A,
    banks: Banks<'a>,
    table: &'a [(Function, SlaveHandler)],
    last_exception: Option<Exception>,
    response: Option<FrameBuffer<A::Buffer>>,
    view: ResponseView,
    context: Ctx,
}

impl<'a, A: FrameAllocator, Ctx: Default> Slave<'a, A, Ctx> {
    pub fn new(address: u8, allocator: A) -> Self {
        Slave {
            address,
            allocator,
            banks: Banks::default(),
            table: DEFAULT_SLAVE_TABLE,
            last_exception: None,
            response: None,
            view: ResponseView::None,
            context: Ctx::default(),
        }
    }
}

impl<'a, A: FrameAllocator, Ctx> Slave<'a, A, Ctx> {
    pub fn with_holding_registers(mut self, bank: &'a mut dyn RegisterWrite) -> Self {
        self.banks.holding = Some(bank);
        self
    }

    pub fn with_input_registers(mut self, bank: &'a mut dyn RegisterRead) -> Self {
        self.banks.input = Some(bank);
        self
    }

    pub fn with_coils(mut self, bank: &'a mut dyn CoilWrite) -> Self {
        self.banks.coils = Some(bank);
        self
    }

    pub fn with_discrete_inputs(mut self, bank: &'a mut dyn CoilRead) -> Self {
        self.banks.discrete = Some(bank);
        self
    }

    pub fn with_table(mut self, table: &'a [(Function, SlaveHandler)]) -> Self {
        self.table = table;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn last_exception(&self) -> Option<Exception> {
        self.last_exception
    }

    pub fn set_user_context(&mut self, context: Ctx) {
        self.context = context;
    }

    pub fn user_context(&self) -> &Ctx {
        &self.context
    }

    pub fn user_context_mut(&mut self) -> &mut Ctx {
        &mut self.context
    }

    /// The bytes of the most recently composed response, in whichever
    /// framing the triggering `parse_request_*` call used. Empty if the
    /// cycle produced no response (broadcast, or a framing-level failure).
    pub fn response(&self) -> &[u8] {
        match (&self.view, &self.response) {
            (ResponseView::Pdu, Some(r)) => r.pdu(),
            (ResponseView::Rtu, Some(r)) => r.rtu_frame(),
            (ResponseView::Tcp, Some(r)) => r.tcp_frame(),
            _ => &[],
        }
    }

    pub fn response_len(&self) -> usize {
        self.response().len()
    }

    fn compose(&mut self, function: Function, payload: &[u8]) -> Result<()> {
        let mut buf = self.allocator.allocate(BufferPurpose::Response, crate::buffer::MAX_PDU_LEN)?;
        let written = {
            let out = buf.pdu_mut();
            out[0] = function.0;
            match dispatch::dispatch(&mut self.banks, self.table, function, payload, &mut out[1..]) {
                Ok(n) => {
                    self.last_exception = None;
                    1 + n
                }
                Err(exc) => {
                    #[cfg(feature = "log")]
                    log::debug!("function {:?} raised exception {:?}", function, exc.0);
                    out[0] = function.with_exception_bit().0;
                    out[1] = exc.0;
                    self.last_exception = Some(exc);
                    2
                }
            }
        };
        buf.set_pdu_len(written);
        self.response = Some(buf);
        Ok(())
    }

    /// Compose an exception response for `function` directly, bypassing
    /// dispatch. Useful for exceptions the handler table has no code path
    /// for (e.g. `GATEWAY_PATH_UNAVAILABLE`/`GATEWAY_TARGET_FAILED_TO_RESPOND`
    /// raised by a caller acting as a gateway in front of this slave).
    fn compose_exception(&mut self, function: Function, exception: Exception) -> Result<()> {
        let mut buf = self.allocator.allocate(BufferPurpose::Response, crate::buffer::MAX_PDU_LEN)?;
        {
            let out = buf.pdu_mut();
            out[0] = function.with_exception_bit().0;
            out[1] = exception.0;
        }
        buf.set_pdu_len(2);
        self.last_exception = Some(exception);
        self.response = Some(buf);
        Ok(())
    }

    /// Build a bare exception PDU response for `function`/`exception`.
    pub fn build_exception_pdu(&mut self, function: Function, exception: Exception) -> Result<()> {
        self.compose_exception(function, exception)?;
        self.view = ResponseView::Pdu;
        Ok(())
    }

    /// Build an RTU-framed exception response, addressed from this slave.
    pub fn build_exception_rtu(&mut self, function: Function, exception: Exception) -> Result<()> {
        self.compose_exception(function, exception)?;
        if let Some(buf) = &mut self.response {
            frame::rtu::finalize(buf, self.address);
        }
        self.view = ResponseView::Rtu;
        Ok(())
    }

    /// Build a TCP/MBAP-framed exception response, echoing `transaction`/`unit`.
    pub fn build_exception_tcp(&mut self, transaction: u16, unit: u8, function: Function, exception: Exception) -> Result<()> {
        self.compose_exception(function, exception)?;
        if let Some(buf) = &mut self.response {
            frame::tcp::finalize(buf, transaction, unit);
        }
        self.view = ResponseView::Tcp;
        Ok(())
    }

    /// Parse a bare PDU (function code + payload) and compose a response PDU.
    pub fn parse_request_pdu(&mut self, pdu: &[u8]) -> Result<()> {
        self.response = None;
        self.view = ResponseView::None;
        let view = PduView::new(pdu).ok_or_else(ErrorInfo::bad_frame)?;
        self.compose(view.function(), view.payload())?;
        self.view = ResponseView::Pdu;
        Ok(())
    }

    /// Parse an RTU frame. Frames not addressed to this slave (and not
    /// broadcast) are silently ignored: no write happens, no response is
    /// composed. Broadcast frames (address 0) perform the request but never
    /// produce a response.
    pub fn parse_request_rtu(&mut self, frame: &[u8]) -> Result<()> {
        self.response = None;
        self.view = ResponseView::None;
        let (address, pdu) = frame::rtu::parse(frame)?;
        if address != self.address && address != frame::rtu::BROADCAST_ADDRESS {
            return Ok(());
        }

        let view = PduView::new(pdu).ok_or_else(ErrorInfo::bad_frame)?;
        self.compose(view.function(), view.payload())?;

        if address == frame::rtu::BROADCAST_ADDRESS {
            self.view = ResponseView::None;
        } else {
            if let Some(buf) = &mut self.response {
                frame::rtu::finalize(buf, self.address);
            }
            self.view = ResponseView::Rtu;
        }
        Ok(())
    }

    /// Parse a TCP/MBAP frame. The response echoes the request's transaction
    /// and unit identifiers.
    pub fn parse_request_tcp(&mut self, frame: &[u8]) -> Result<()> {
        self.response = None;
        self.view = ResponseView::None;
        let (header, pdu) = frame::tcp::parse(frame)?;
        let view = PduView::new(pdu).ok_or_else(ErrorInfo::bad_frame)?;
        self.compose(view.function(), view.payload())?;
        if let Some(buf) = &mut self.response {
            frame::tcp::finalize(buf, header.transaction, header.unit);
        }
        self.view = ResponseView::Tcp;
        Ok(())
    }
}
