#![no_std]

//! Page-mapped driver for AT24Cxx serial EEPROMs.
//!
//! [`Eeprom`] turns linear byte-address reads, writes and updates into the
//! page-sized bus transactions the device accepts. The bus itself is any
//! [`BusTransport`]; [`adapters::i2c`] provides one over `embedded-hal`.

extern crate alloc;

mod config;
mod dump;
mod paged;
mod payload;
mod store;

pub mod adapters;

pub use adapters::BusTransport;
pub use config::*;
pub use dump::*;
pub use paged::*;
pub use payload::*;
pub use store::*;

/// Linear byte offset into the flattened device.
pub type Address = usize;

/// Value written by [`Eeprom::wipe`], the erased state of a cell.
pub const ERASED: u8 = 0xff;

#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// Start address outside of the device address range.
    OutOfRange { addr: Address, capacity: usize },
    /// Data does not fit into the remaining device address range.
    CapacityExceeded {
        addr: Address,
        len: usize,
        capacity: usize,
    },
    /// Integer payload element outside of `0..=255`.
    InvalidPayload { index: usize, value: i32 },
    InvalidGeometry { pages: usize, page_size: usize },
    /// The sink given to [`Eeprom::print_pages`] failed.
    Format,
    TransportError(E),
}
