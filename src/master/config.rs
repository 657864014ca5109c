//! The master instance: allocator, function-handler table, data/exception
//! callbacks, and the request-builder / response-parser cycle built on top
//! of [`crate::buffer::FrameAllocator`].

use crate::buffer::{FrameAllocator, FrameBuffer};
use crate::frame;
use crate::function::Function;
use crate::{BufferPurpose, ErrorInfo, Result};

use super::callback::{DataCallback, ExceptionCallback};
use super::dispatch;
use super::functions;
use super::table::DEFAULT_MASTER_TABLE;
use super::MasterHandler;

enum RequestView {
    None,
    Pdu,
    Rtu,
    Tcp,
}

/// A Modbus master: owns its allocator, data/exception callbacks, and a
/// function handler table that drives response parsing.
///
/// `E` defaults to `()`, a no-op [`ExceptionCallback`], so callers that don't
/// care about exceptions can skip `with_exception_callback` entirely.
pub struct Master<'a, A: FrameAllocator, D: DataCallback, E: ExceptionCallback = (), Ctx = ()> {
    allocator: A,
    table: &'a [(Function, MasterHandler)],
    data_callback: D,
    exception_callback: E,
    request: Option<FrameBuffer<A::Buffer>>,
    view: RequestView,
    context: Ctx,
}

impl<'a, A: FrameAllocator, D: DataCallback, Ctx: Default> Master<'a, A, D, (), Ctx> {
    pub fn new(allocator: A, data_callback: D) -> Self {
        Master {
            allocator,
            table: DEFAULT_MASTER_TABLE,
            data_callback,
            exception_callback: (),
            request: None,
            view: RequestView::None,
            context: Ctx::default(),
        }
    }
}

impl<'a, A: FrameAllocator, D: DataCallback, E: ExceptionCallback, Ctx> Master<'a, A, D, E, Ctx> {
    pub fn with_table(mut self, table: &'a [(Function, MasterHandler)]) -> Self {
        self.table = table;
        self
    }

    /// Replace the no-op exception callback with a real one. Consumes and
    /// rebuilds the instance because the callback's concrete type is part of
    /// `Master`'s type (it's stored by value, not boxed, to stay `alloc`-free).
    pub fn with_exception_callback<E2: ExceptionCallback>(self, exception_callback: E2) -> Master<'a, A, D, E2, Ctx> {
        Master {
            allocator: self.allocator,
            table: self.table,
            data_callback: self.data_callback,
            exception_callback,
            request: self.request,
            view: self.view,
            context: self.context,
        }
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

    /// The bytes of the most recently built request, in whichever framing
    /// the triggering `build_*` call used.
    pub fn request(&self) -> &[u8] {
        match (&self.view, &self.request) {
            (RequestView::Pdu, Some(r)) => r.pdu(),
            (RequestView::Rtu, Some(r)) => r.rtu_frame(),
            (RequestView::Tcp, Some(r)) => r.tcp_frame(),
            _ => &[],
        }
    }

    pub fn request_len(&self) -> usize {
        self.request().len()
    }

    fn reserve_and_write<F>(&mut self, pdu_len_upper_bound: usize, write: F) -> Result<usize>
    where
        F: FnOnce(&mut [u8]) -> Result<usize>,
    {
        let buf = self.allocator.allocate(BufferPurpose::Request, pdu_len_upper_bound)?;
        self.request = Some(buf);
        write(self.request.as_mut().expect("just allocated above").pdu_mut())
    }

    fn finish_pdu(&mut self, written: usize) -> Result<()> {
        let buf = self.request.as_mut().ok_or_else(ErrorInfo::request_build_fail)?;
        buf.set_pdu_len(written);
        self.view = RequestView::Pdu;
        Ok(())
    }

    fn finish_rtu(&mut self, written: usize, address: u8) -> Result<()> {
        let buf = self.request.as_mut().ok_or_else(ErrorInfo::request_build_fail)?;
        buf.set_pdu_len(written);
        frame::rtu::finalize(buf, address);
        self.view = RequestView::Rtu;
        Ok(())
    }

    fn finish_tcp(&mut self, written: usize, transaction: u16, unit: u8) -> Result<()> {
        let buf = self.request.as_mut().ok_or_else(ErrorInfo::request_build_fail)?;
        buf.set_pdu_len(written);
        frame::tcp::finalize(buf, transaction, unit);
        self.view = RequestView::Tcp;
        Ok(())
    }

    /// Parse a bare PDU response. `address` is informational (there is no
    /// addressing in the PDU framing itself) and is only threaded through to
    /// the data/exception callbacks.
    pub fn parse_response_pdu(&mut self, address: u8, request_pdu: &[u8], response_pdu: &[u8]) -> Result<()> {
        dispatch::dispatch_pdu(
            self.table,
            request_pdu,
            response_pdu,
            address,
            &mut self.data_callback,
            Some(&mut self.exception_callback as &mut dyn ExceptionCallback),
        )
    }

    /// Parse an RTU response against the RTU request that produced it. Both
    /// frames' CRCs are validated and their addresses must match.
    pub fn parse_response_rtu(&mut self, request_frame: &[u8], response_frame: &[u8]) -> Result<()> {
        let (request_address, request_pdu) = frame::rtu::parse(request_frame)?;
        let (response_address, response_pdu) = frame::rtu::parse(response_frame)?;
        if request_address != response_address {
            return Err(ErrorInfo::response_parse_fail());
        }
        self.parse_response_pdu(response_address, request_pdu, response_pdu)
    }

    /// Parse a TCP/MBAP response against the TCP request that produced it.
    /// Both transaction id and unit id must match between request and
    /// response: a transaction mismatch fails the parse without invoking
    /// the data callback.
    pub fn parse_response_tcp(&mut self, request_frame: &[u8], response_frame: &[u8]) -> Result<()> {
        let (request_header, request_pdu) = frame::tcp::parse(request_frame)?;
        let (response_header, response_pdu) = frame::tcp::parse(response_frame)?;
        if request_header.transaction != response_header.transaction || request_header.unit != response_header.unit {
            return Err(ErrorInfo::response_parse_fail());
        }
        self.parse_response_pdu(response_header.unit, request_pdu, response_pdu)
    }

    pub fn build_read_coils_pdu(&mut self, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_coils::REQUEST_PDU_LEN, |out| {
            functions::read_coils::build_request(out, start, count)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_read_coils_rtu(&mut self, address: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_coils::REQUEST_PDU_LEN, |out| {
            functions::read_coils::build_request(out, start, count)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_read_coils_tcp(&mut self, transaction: u16, unit: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_coils::REQUEST_PDU_LEN, |out| {
            functions::read_coils::build_request(out, start, count)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_read_discrete_inputs_pdu(&mut self, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_discrete_inputs::REQUEST_PDU_LEN, |out| {
            functions::read_discrete_inputs::build_request(out, start, count)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_read_discrete_inputs_rtu(&mut self, address: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_discrete_inputs::REQUEST_PDU_LEN, |out| {
            functions::read_discrete_inputs::build_request(out, start, count)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_read_discrete_inputs_tcp(&mut self, transaction: u16, unit: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_discrete_inputs::REQUEST_PDU_LEN, |out| {
            functions::read_discrete_inputs::build_request(out, start, count)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_read_holding_registers_pdu(&mut self, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_holding_registers::REQUEST_PDU_LEN, |out| {
            functions::read_holding_registers::build_request(out, start, count)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_read_holding_registers_rtu(&mut self, address: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_holding_registers::REQUEST_PDU_LEN, |out| {
            functions::read_holding_registers::build_request(out, start, count)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_read_holding_registers_tcp(&mut self, transaction: u16, unit: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_holding_registers::REQUEST_PDU_LEN, |out| {
            functions::read_holding_registers::build_request(out, start, count)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_read_input_registers_pdu(&mut self, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_input_registers::REQUEST_PDU_LEN, |out| {
            functions::read_input_registers::build_request(out, start, count)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_read_input_registers_rtu(&mut self, address: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_input_registers::REQUEST_PDU_LEN, |out| {
            functions::read_input_registers::build_request(out, start, count)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_read_input_registers_tcp(&mut self, transaction: u16, unit: u8, start: u16, count: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::read_input_registers::REQUEST_PDU_LEN, |out| {
            functions::read_input_registers::build_request(out, start, count)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_write_single_coil_pdu(&mut self, index: u16, value: bool) -> Result<()> {
        let written = self.reserve_and_write(functions::write_single_coil::REQUEST_PDU_LEN, |out| {
            functions::write_single_coil::build_request(out, index, value)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_write_single_coil_rtu(&mut self, address: u8, index: u16, value: bool) -> Result<()> {
        let written = self.reserve_and_write(functions::write_single_coil::REQUEST_PDU_LEN, |out| {
            functions::write_single_coil::build_request(out, index, value)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_write_single_coil_tcp(&mut self, transaction: u16, unit: u8, index: u16, value: bool) -> Result<()> {
        let written = self.reserve_and_write(functions::write_single_coil::REQUEST_PDU_LEN, |out| {
            functions::write_single_coil::build_request(out, index, value)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_write_single_register_pdu(&mut self, index: u16, value: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::write_single_register::REQUEST_PDU_LEN, |out| {
            functions::write_single_register::build_request(out, index, value)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_write_single_register_rtu(&mut self, address: u8, index: u16, value: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::write_single_register::REQUEST_PDU_LEN, |out| {
            functions::write_single_register::build_request(out, index, value)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_write_single_register_tcp(&mut self, transaction: u16, unit: u8, index: u16, value: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::write_single_register::REQUEST_PDU_LEN, |out| {
            functions::write_single_register::build_request(out, index, value)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_write_multiple_coils_pdu(
        &mut self,
        start: u16,
        count: u16,
        values: impl IntoIterator<Item = bool>,
    ) -> Result<()> {
        let upper_bound = functions::write_multiple_coils::request_pdu_len(count);
        let written = self.reserve_and_write(upper_bound, |out| {
            functions::write_multiple_coils::build_request(out, start, count, values)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_write_multiple_coils_rtu(
        &mut self,
        address: u8,
        start: u16,
        count: u16,
        values: impl IntoIterator<Item = bool>,
    ) -> Result<()> {
        let upper_bound = functions::write_multiple_coils::request_pdu_len(count);
        let written = self.reserve_and_write(upper_bound, |out| {
            functions::write_multiple_coils::build_request(out, start, count, values)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_write_multiple_coils_tcp(
        &mut self,
        transaction: u16,
        unit: u8,
        start: u16,
        count: u16,
        values: impl IntoIterator<Item = bool>,
    ) -> Result<()> {
        let upper_bound = functions::write_multiple_coils::request_pdu_len(count);
        let written = self.reserve_and_write(upper_bound, |out| {
            functions::write_multiple_coils::build_request(out, start, count, values)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_write_multiple_registers_pdu(&mut self, start: u16, values: &[u16]) -> Result<()> {
        let upper_bound = functions::write_multiple_registers::request_pdu_len(values.len() as u16);
        let written = self.reserve_and_write(upper_bound, |out| {
            functions::write_multiple_registers::build_request(out, start, values)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_write_multiple_registers_rtu(&mut self, address: u8, start: u16, values: &[u16]) -> Result<()> {
        let upper_bound = functions::write_multiple_registers::request_pdu_len(values.len() as u16);
        let written = self.reserve_and_write(upper_bound, |out| {
            functions::write_multiple_registers::build_request(out, start, values)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_write_multiple_registers_tcp(
        &mut self,
        transaction: u16,
        unit: u8,
        start: u16,
        values: &[u16],
    ) -> Result<()> {
        let upper_bound = functions::write_multiple_registers::request_pdu_len(values.len() as u16);
        let written = self.reserve_and_write(upper_bound, |out| {
            functions::write_multiple_registers::build_request(out, start, values)
        })?;
        self.finish_tcp(written, transaction, unit)
    }

    pub fn build_mask_write_register_pdu(&mut self, index: u16, and_mask: u16, or_mask: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::mask_write_register::REQUEST_PDU_LEN, |out| {
            functions::mask_write_register::build_request(out, index, and_mask, or_mask)
        })?;
        self.finish_pdu(written)
    }

    pub fn build_mask_write_register_rtu(&mut self, address: u8, index: u16, and_mask: u16, or_mask: u16) -> Result<()> {
        let written = self.reserve_and_write(functions::mask_write_register::REQUEST_PDU_LEN, |out| {
            functions::mask_write_register::build_request(out, index, and_mask, or_mask)
        })?;
        self.finish_rtu(written, address)
    }

    pub fn build_mask_write_register_tcp(
        &mut self,
        transaction: u16,
        unit: u8,
        index: u16,
        and_mask: u16,
        or_mask: u16,
    ) -> Result<()> {
        let written = self.reserve_and_write(functions::mask_write_register::REQUEST_PDU_LEN, |out| {
            functions::mask_write_register::build_request(out, index, and_mask, or_mask)
        })?;
        self.finish_tcp(written, transaction, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::StaticAllocator;
    use crate::{DataCallbackArgs, ErrorInfo};

    #[test]
    fn matches_read_holding_registers_rtu_scenario() {
        let mut master = Master::<'_, _, _, (), ()>::new(StaticAllocator::<16>::new(), |_: DataCallbackArgs| Ok(()));
        master.build_read_holding_registers_rtu(7, 1, 2).unwrap();
        assert_eq!(master.request(), [0x07, 0x03, 0x00, 0x01, 0x00, 0x02, 0x95, 0x59]);
    }

    #[test]
    fn matches_write_multiple_coils_rtu_scenario() {
        let mut master = Master::<'_, _, _, (), ()>::new(StaticAllocator::<32>::new(), |_: DataCallbackArgs| Ok(()));
        let bits = [true, false, true, false, true, false, true, false, true, false];
        master.build_write_multiple_coils_rtu(1, 0, 10, bits.iter().copied()).unwrap();
        assert_eq!(
            master.request(),
            [0x01, 0x0F, 0x00, 0x00, 0x00, 0x0A, 0x02, 0x55, 0x02, 0x5B, 0xA9]
        );
    }

    #[test]
    fn parse_response_rtu_invokes_data_callback_in_order() {
        let mut seen = Vec::new();
        let mut master = Master::<'_, _, _, (), ()>::new(StaticAllocator::<16>::new(), |args: DataCallbackArgs| {
            seen.push((args.index, args.value));
            Ok(())
        });
        master.build_read_holding_registers_rtu(7, 1, 2).unwrap();
        let request_frame = master.request().to_vec();

        // slave response PDU `03 04 22 22 33 33`, wrapped in RTU framing.
        let mut response = vec![0x07u8, 0x03, 0x04, 0x22, 0x22, 0x33, 0x33];
        let crc = crate::crc::calculate_crc16(&response);
        response.extend_from_slice(&crc.to_le_bytes());

        master.parse_response_rtu(&request_frame, &response).unwrap();
        assert_eq!(seen, [(1, 0x2222), (2, 0x3333)]);
    }

    #[test]
    fn parse_response_tcp_rejects_transaction_mismatch() {
        let mut master = Master::<'_, _, _, (), ()>::new(StaticAllocator::<32>::new(), |_: DataCallbackArgs| Ok(()));
        master.build_read_holding_registers_tcp(0x1234, 1, 0, 1).unwrap();
        let request_frame = master.request().to_vec();

        // response carries a different transaction id: 0x1235 instead of 0x1234
        let response = [0x12, 0x35, 0x00, 0x00, 0x00, 0x05, 0x01, 0x03, 0x02, 0x00, 0x00];
        assert_eq!(
            master.parse_response_tcp(&request_frame, &response).unwrap_err(),
            ErrorInfo::response_parse_fail()
        );
    }

    #[test]
    fn parse_response_pdu_dispatches_exception_to_exception_callback() {
        let mut exceptions = Vec::new();
        let master = Master::<'_, _, _, (), ()>::new(StaticAllocator::<16>::new(), |_: DataCallbackArgs| Ok(()));
        let mut master = master.with_exception_callback(|address: u8, function: crate::Function, exception: crate::Exception| {
            exceptions.push((address, function, exception));
        });
        master.build_read_holding_registers_pdu(3, 2).unwrap();
        let request_pdu = master.request().to_vec();

        // illegal address exception `83 02`
        master.parse_response_pdu(9, &request_pdu, &[0x83, 0x02]).unwrap();
        assert_eq!(exceptions, [(9, crate::function::READ_HOLDING_REGISTERS, crate::exception::ILLEGAL_DATA_ADDRESS)]);
    }
}
