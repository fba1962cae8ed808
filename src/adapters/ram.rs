use crate::adapters::*;
use crate::{DEFAULT_ADDRESS, ERASED};

/// EEPROM image kept in RAM.
///
/// Behaves like the real part: it only answers its own bus address and a
/// memory write running past the end of a page wraps around to the start
/// of that same page.
pub struct MemoryTransport<const SIZE: usize, const PAGE_SIZE: usize> {
    pub memory: [u8; SIZE],
    device: u8,
}

impl<const SIZE: usize, const PAGE_SIZE: usize> Default for MemoryTransport<SIZE, PAGE_SIZE> {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, [ERASED; SIZE])
    }
}

impl<const SIZE: usize, const PAGE_SIZE: usize> MemoryTransport<SIZE, PAGE_SIZE> {
    pub fn new(device: u8, memory: [u8; SIZE]) -> Self {
        assert!(PAGE_SIZE > 0 && SIZE % PAGE_SIZE == 0);
        Self { memory, device }
    }

    pub fn release(self) -> [u8; SIZE] {
        self.memory
    }
}

impl<const SIZE: usize, const PAGE_SIZE: usize> BusTransport for MemoryTransport<SIZE, PAGE_SIZE> {
    type Error = ();

    fn write(&mut self, device: u8, _data: &[u8]) -> Result<(), Self::Error> {
        if device != self.device {
            return Err(());
        }
        Ok(())
    }

    fn read_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        if device != self.device || mem_addr >= SIZE {
            return Err(());
        }
        // Sequential reads roll over from the last byte to the first.
        for (idx, byte) in buf.iter_mut().enumerate() {
            *byte = self.memory[(mem_addr + idx) % SIZE];
        }
        Ok(())
    }

    fn write_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        if device != self.device || mem_addr >= SIZE {
            return Err(());
        }
        let page = mem_addr - mem_addr % PAGE_SIZE;
        for (idx, byte) in data.iter().enumerate() {
            self.memory[page + (mem_addr + idx) % PAGE_SIZE] = *byte;
        }
        Ok(())
    }
}
