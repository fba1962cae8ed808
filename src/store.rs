use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};

use crate::{
    Address, BusTransport, DeviceConfig, Error, PageDump, PageSegments, Payload, ERASED,
    MAX_PAGE_SIZE,
};

/// Linear view of a paged EEPROM.
///
/// Reads go out as one sequential read, writes are split so that no bus
/// write crosses a page boundary. Geometry and bus address are fixed once
/// the driver is built.
pub struct Eeprom<T: BusTransport> {
    transport: T,
    config: DeviceConfig,
}

impl<T, E> Eeprom<T>
where
    T: BusTransport<Error = E>,
{
    /// Driver for an AT24C32 on address `0x50`.
    pub fn with_defaults(transport: T) -> Self {
        Self {
            transport,
            config: DeviceConfig::default(),
        }
    }

    pub fn new(transport: T, config: DeviceConfig) -> Result<Self, Error<E>> {
        if config.pages == 0
            || config.page_size == 0
            || config.page_size > MAX_PAGE_SIZE
            || config.pages.checked_mul(config.page_size).is_none()
        {
            return Err(Error::InvalidGeometry {
                pages: config.pages,
                page_size: config.page_size,
            });
        }
        Ok(Self { transport, config })
    }

    pub fn release(self) -> T {
        self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn device_address(&self) -> u8 {
        self.config.address
    }

    pub fn pages(&self) -> usize {
        self.config.pages
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Same as [`capacity`](Self::capacity).
    pub fn len(&self) -> usize {
        self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.capacity() == 0
    }

    /// Checks that the device acknowledges its bus address.
    pub fn probe(&mut self) -> Result<(), Error<E>> {
        self.transport
            .write(self.config.address, &[])
            .map_err(Error::TransportError)
    }

    pub fn read(&mut self, addr: Address, nbytes: usize) -> Result<Vec<u8>, Error<E>> {
        let mut buf = vec![0; nbytes];
        self.read_into(addr, &mut buf)?;
        Ok(buf)
    }

    /// Fills `buf` from `addr` on in a single sequential read. Only the
    /// start address is checked, the device itself rolls over at the end.
    /// An empty `buf` leaves the bus untouched.
    pub fn read_into(&mut self, addr: Address, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.check_addr(addr)?;
        if buf.is_empty() {
            return Ok(());
        }

        trace!("read {} bytes @{}", buf.len(), addr);
        self.transport
            .read_memory(self.config.address, addr, buf)
            .map_err(Error::TransportError)
    }

    pub fn write<'a, P>(&mut self, addr: Address, data: P) -> Result<(), Error<E>>
    where
        P: Into<Payload<'a>>,
    {
        let data = Self::normalize(data.into())?;
        self.check_span(addr, data.len())?;
        self.write_paged(addr, &data)
    }

    /// Writes only the bytes that differ from the current device contents,
    /// one single-byte write each, saving write cycles on unchanged cells.
    pub fn update<'a, P>(&mut self, addr: Address, data: P) -> Result<(), Error<E>>
    where
        P: Into<Payload<'a>>,
    {
        let data = Self::normalize(data.into())?;
        self.check_span(addr, data.len())?;
        if data.is_empty() {
            return Ok(());
        }

        let current = self.read(addr, data.len())?;
        let mut changed = 0;
        for (idx, (old, new)) in current.iter().zip(data.iter()).enumerate() {
            if old != new {
                self.write_paged(addr + idx, &[*new])?;
                changed += 1;
            }
        }

        debug!("update @{}: {} of {} bytes changed", addr, changed, data.len());
        Ok(())
    }

    /// Sets every cell to [`ERASED`].
    pub fn wipe(&mut self) -> Result<(), Error<E>> {
        self.fill(ERASED)
    }

    /// Writes `value` to the whole device, one full page per bus write.
    pub fn fill(&mut self, value: u8) -> Result<(), Error<E>> {
        let page = vec![value; self.config.page_size];
        for idx in 0..self.config.pages {
            let addr = idx * self.config.page_size;
            trace!("fill page {} @{}", idx, addr);
            self.transport
                .write_memory(self.config.address, addr, &page)
                .map_err(Error::TransportError)?;
        }

        debug!("filled {} pages with {:#04x}", self.config.pages, value);
        Ok(())
    }

    /// Reads `nbytes` from `addr` on and arranges them one page per row.
    pub fn dump(&mut self, addr: Address, nbytes: usize) -> Result<PageDump, Error<E>> {
        let data = self.read(addr, nbytes)?;
        Ok(PageDump::new(addr, self.config.page_size, data))
    }

    /// Prints [`dump`](Self::dump) to `out`.
    pub fn print_pages<W: fmt::Write>(
        &mut self,
        addr: Address,
        nbytes: usize,
        out: &mut W,
    ) -> Result<(), Error<E>> {
        let dump = self.dump(addr, nbytes)?;
        write!(out, "{}", dump).map_err(|_| Error::Format)
    }

    fn normalize(data: Payload<'_>) -> Result<Cow<'_, [u8]>, Error<E>> {
        data.to_bytes()
            .map_err(|(index, value)| Error::InvalidPayload { index, value })
    }

    fn check_addr(&self, addr: Address) -> Result<(), Error<E>> {
        if addr >= self.capacity() {
            return Err(Error::OutOfRange {
                addr,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn check_span(&self, addr: Address, len: usize) -> Result<(), Error<E>> {
        self.check_addr(addr)?;
        if addr + len > self.capacity() {
            return Err(Error::CapacityExceeded {
                addr,
                len,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn write_paged(&mut self, addr: Address, data: &[u8]) -> Result<(), Error<E>> {
        for segment in PageSegments::new(addr, data.len(), self.config.page_size) {
            trace!("write {} bytes @{}", segment.len(), segment.addr);
            self.transport
                .write_memory(self.config.address, segment.addr, &data[segment.range])
                .map_err(Error::TransportError)?;
        }
        Ok(())
    }
}
