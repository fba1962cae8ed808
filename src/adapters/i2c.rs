use core::fmt::Debug;

use byteorder::{BigEndian, ByteOrder};
use embedded_hal::blocking::i2c;
use log::{trace, warn};
use modular_bitfield::prelude::*;

use crate::adapters::*;
use crate::MAX_PAGE_SIZE;

/// Acknowledge polls issued after a memory write before giving up.
pub const ACK_POLL_ATTEMPTS: usize = 1000;

/// Transport for parts with a one byte memory address (AT24C01..AT24C16).
pub type I2cTransport8<I2C> = I2cTransport<I2C, 1>;
/// Transport for parts with a two byte memory address (AT24C32..AT24CM02).
pub type I2cTransport16<I2C> = I2cTransport<I2C, 2>;

/// Device-select byte in 7-bit form: `1010` family code on top, then
/// three bits holding either the A2..A0 pins or the high memory address
/// bits on parts that do not wire all pins.
#[bitfield]
#[derive(Debug, Clone, Copy)]
pub struct DeviceSelect {
    pub block: B3,
    pub family: B4,
    #[skip]
    __: B1,
}

pub enum Error<I2C: i2c::Write + i2c::WriteRead> {
    WriteError(<I2C as i2c::Write>::Error),
    WriteReadError(<I2C as i2c::WriteRead>::Error),
    /// Device did not come back from its write cycle.
    NotAcknowledged,
    /// Memory write larger than any page of the family.
    SegmentOverflow,
}

impl<I2C: i2c::Write + i2c::WriteRead> Debug for Error<I2C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WriteError(_) => write!(f, "I2C Write Error"),
            Self::WriteReadError(_) => write!(f, "I2C WriteRead Error"),
            Self::NotAcknowledged => write!(f, "Device Not Acknowledged"),
            Self::SegmentOverflow => write!(f, "Segment Overflow"),
        }
    }
}

#[derive(Debug)]
pub struct I2cTransport<I2C: i2c::Write + i2c::WriteRead, const ADDR_BYTES: usize> {
    i2c: I2C,
    ack_poll_attempts: usize,
}

impl<I2C: i2c::Write + i2c::WriteRead, const ADDR_BYTES: usize> I2cTransport<I2C, ADDR_BYTES> {
    pub fn new(i2c: I2C) -> Self {
        assert!(ADDR_BYTES > 0 && ADDR_BYTES <= 2);
        Self {
            i2c,
            ack_poll_attempts: ACK_POLL_ATTEMPTS,
        }
    }

    /// Sets how many zero-length writes are spent waiting for the end of a
    /// write cycle. `0` skips polling, leaving the wait to the caller.
    pub fn with_ack_polling(self, attempts: usize) -> Self {
        Self {
            ack_poll_attempts: attempts,
            ..self
        }
    }

    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Folds the memory address bits that do not fit into `ADDR_BYTES`
    /// into the block-select bits of the device address.
    pub fn select(device: u8, mem_addr: Address) -> u8 {
        let block = (mem_addr >> (ADDR_BYTES * 8)) as u8 & 0b111;
        let select = DeviceSelect::from_bytes([device]);
        select.with_block(select.block() | block).into_bytes()[0]
    }

    fn mem_addr(mem_addr: Address) -> [u8; 2] {
        let mut buf = [0; 2];
        match ADDR_BYTES {
            1 => buf[0] = mem_addr as u8,
            2 => BigEndian::write_u16(&mut buf, mem_addr as u16),
            _ => unreachable!(),
        };
        buf
    }

    fn wait_ready(&mut self, device: u8) -> Result<(), Error<I2C>> {
        if self.ack_poll_attempts == 0 {
            return Ok(());
        }
        for attempt in 0..self.ack_poll_attempts {
            if self.i2c.write(device, &[]).is_ok() {
                trace!("device {:#04x} ready after {} polls", device, attempt + 1);
                return Ok(());
            }
        }
        warn!(
            "device {:#04x} not acknowledged after {} polls",
            device, self.ack_poll_attempts
        );
        Err(Error::NotAcknowledged)
    }
}

impl<I2C: i2c::Write + i2c::WriteRead, const ADDR_BYTES: usize> BusTransport
    for I2cTransport<I2C, ADDR_BYTES>
{
    type Error = Error<I2C>;

    fn write(&mut self, device: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(device, data).map_err(Error::WriteError)
    }

    fn read_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let cmd = Self::mem_addr(mem_addr);
        self.i2c
            .write_read(Self::select(device, mem_addr), &cmd[..ADDR_BYTES], buf)
            .map_err(Error::WriteReadError)
    }

    fn write_memory(
        &mut self,
        device: u8,
        mem_addr: Address,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        if data.len() > MAX_PAGE_SIZE {
            return Err(Error::SegmentOverflow);
        }

        let mut frame = [0; MAX_PAGE_SIZE + 2];
        frame[..ADDR_BYTES].copy_from_slice(&Self::mem_addr(mem_addr)[..ADDR_BYTES]);
        frame[ADDR_BYTES..(ADDR_BYTES + data.len())].copy_from_slice(data);

        let device = Self::select(device, mem_addr);
        self.i2c
            .write(device, &frame[..(ADDR_BYTES + data.len())])
            .map_err(Error::WriteError)?;
        self.wait_ready(device)
    }
}
