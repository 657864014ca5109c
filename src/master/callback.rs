//! The two callbacks a master is configured with: one invoked per decoded
//! register/coil value, one invoked when a response carries an exception.
//!
//! Both are plain traits rather than raw function pointers so a caller can
//! close over state (a `FnMut` closure implements both blanket impls below),
//! matching the `ModbusDataCallback`/`ModbusExceptionCallback` pair from the
//! C original without the accompanying `void *context` threading.

use crate::{DataCallbackArgs, ErrorInfo, Exception, Function};

/// Invoked once per decoded register or coil value, in ascending index order.
pub trait DataCallback {
    fn on_value(&mut self, args: DataCallbackArgs) -> Result<(), ErrorInfo>;
}

impl<F> DataCallback for F
where
    F: FnMut(DataCallbackArgs) -> Result<(), ErrorInfo>,
{
    fn on_value(&mut self, args: DataCallbackArgs) -> Result<(), ErrorInfo> {
        self(args)
    }
}

/// Invoked at most once per parse, when the response PDU's function code has
/// its exception bit set.
pub trait ExceptionCallback {
    fn on_exception(&mut self, address: u8, function: Function, exception: Exception);
}

impl<F> ExceptionCallback for F
where
    F: FnMut(u8, Function, Exception),
{
    fn on_exception(&mut self, address: u8, function: Function, exception: Exception) {
        self(address, function, exception)
    }
}

/// The default, no-op exception callback used when a [`super::Master`] is
/// built with [`super::Master::new`] and never given a real one.
impl ExceptionCallback for () {
    fn on_exception(&mut self, _address: u8, _function: Function, _exception: Exception) {}
}
