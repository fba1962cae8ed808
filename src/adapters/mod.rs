use crate::Address;

pub mod i2c;
pub mod ram;

/// Raw addressed access to an EEPROM on a two-wire bus.
///
/// `device` is the 7-bit bus address, `mem_addr` a byte offset inside the
/// device. Callers never hand `write_memory` data crossing a page boundary.
pub trait BusTransport {
    type Error;

    /// Plain write to the device, without a memory address.
    fn write(&mut self, device: u8, data: &[u8]) -> Result<(), Self::Error>;
    fn read_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;
    fn write_memory(&mut self, device: u8, mem_addr: Address, data: &[u8])
        -> Result<(), Self::Error>;
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    type Error = T::Error;

    fn write(&mut self, device: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(device, data)
    }

    fn read_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).read_memory(device, mem_addr, buf)
    }

    fn write_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        (**self).write_memory(device, mem_addr, data)
    }
}
