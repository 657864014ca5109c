//! Virtualized banks: instead of a flat array, a set of closures supplies
//! read/write/write-check queries. This is the safe-Rust analogue of the C
//! "register callback" feature (`ModbusRegisterCallbackFunction`) that lets a
//! slave compute or proxy a value instead of storing it in an array — e.g. a
//! holding register backed by a sensor reading or an EEPROM cell.

use crate::exception::Exception;

use super::{CoilRead, CoilWrite, RegisterRead, RegisterWrite};

/// A register bank backed by closures rather than a flat array.
pub struct CallbackRegisters<'a> {
    len: u16,
    read: &'a mut dyn FnMut(u16) -> Option<u16>,
    write: Option<&'a mut dyn FnMut(u16, u16) -> Result<(), Exception>>,
    can_write: &'a dyn Fn(u16) -> bool,
}

impl<'a> CallbackRegisters<'a> {
    /// A read-only virtualized bank (suitable for input registers).
    pub fn read_only(len: u16, read: &'a mut dyn FnMut(u16) -> Option<u16>) -> Self {
        CallbackRegisters {
            len,
            read,
            write: None,
            can_write: &|_| false,
        }
    }

    /// A read-write virtualized bank (suitable for holding registers).
    pub fn read_write(
        len: u16,
        read: &'a mut dyn FnMut(u16) -> Option<u16>,
        write: &'a mut dyn FnMut(u16, u16) -> Result<(), Exception>,
        can_write: &'a dyn Fn(u16) -> bool,
    ) -> Self {
        CallbackRegisters {
            len,
            read,
            write: Some(write),
            can_write,
        }
    }
}

impl RegisterRead for CallbackRegisters<'_> {
    fn len(&self) -> u16 {
        self.len
    }

    fn read(&mut self, index: u16) -> Option<u16> {
        if index >= self.len {
            return None;
        }
        (self.read)(index)
    }
}

impl RegisterWrite for CallbackRegisters<'_> {
    fn can_write(&self, index: u16) -> bool {
        index < self.len && (self.can_write)(index)
    }

    fn write(&mut self, index: u16, value: u16) -> Result<(), Exception> {
        if !self.can_write(index) {
            return Err(crate::exception::ILLEGAL_DATA_ADDRESS);
        }
        match &mut self.write {
            Some(write) => write(index, value),
            None => Err(crate::exception::ILLEGAL_DATA_ADDRESS),
        }
    }
}

/// A coil bank backed by closures rather than packed bytes.
pub struct CallbackCoils<'a> {
    len: u16,
    read: &'a mut dyn FnMut(u16) -> Option<bool>,
    write: Option<&'a mut dyn FnMut(u16, bool) -> Result<(), Exception>>,
    can_write: &'a dyn Fn(u16) -> bool,
}

impl<'a> CallbackCoils<'a> {
    pub fn read_only(len: u16, read: &'a mut dyn FnMut(u16) -> Option<bool>) -> Self {
        CallbackCoils {
            len,
            read,
            write: None,
            can_write: &|_| false,
        }
    }

    pub fn read_write(
        len: u16,
        read: &'a mut dyn FnMut(u16) -> Option<bool>,
        write: &'a mut dyn FnMut(u16, bool) -> Result<(), Exception>,
        can_write: &'a dyn Fn(u16) -> bool,
    ) -> Self {
        CallbackCoils {
            len,
            read,
            write: Some(write),
            can_write,
        }
    }
}

impl CoilRead for CallbackCoils<'_> {
    fn len(&self) -> u16 {
        self.len
    }

    fn read(&mut self, index: u16) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        (self.read)(index)
    }
}

impl CoilWrite for CallbackCoils<'_> {
    fn can_write(&self, index: u16) -> bool {
        index < self.len && (self.can_write)(index)
    }

    fn write(&mut self, index: u16, value: bool) -> Result<(), Exception> {
        if !self.can_write(index) {
            return Err(crate::exception::ILLEGAL_DATA_ADDRESS);
        }
        match &mut self.write {
            Some(write) => write(index, value),
            None => Err(crate::exception::ILLEGAL_DATA_ADDRESS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_bank_rejects_writes() {
        let mut backing = [10u16, 20, 30];
        let mut read = |i: u16| backing.get(i as usize).copied();
        let mut bank = CallbackRegisters::read_only(3, &mut read);
        assert_eq!(bank.read(1), Some(20));
        assert!(!bank.can_write(1));
    }

    #[test]
    fn read_write_bank_forwards_to_closures() {
        let mut backing = [0u16; 2];
        let mut read = |i: u16| backing.get(i as usize).copied();
        // second closure captures nothing external since `backing` is borrowed
        // by `read`; use a cell-free approach by writing through an index into
        // a local scratch instead for the purposes of this test.
        let mut scratch = [0u16; 2];
        let mut write = |i: u16, v: u16| {
            scratch[i as usize] = v;
            Ok(())
        };
        let can_write = |_: u16| true;
        let mut bank = CallbackRegisters::read_write(2, &mut read, &mut write, &can_write);
        assert!(bank.write(0, 42).is_ok());
        assert_eq!(scratch[0], 42);
    }
}
