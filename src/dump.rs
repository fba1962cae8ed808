use alloc::vec::Vec;
use core::fmt;

use crate::Address;

/// Bytes read from the device laid out one page per row.
///
/// Positions of a row that were not read are shown as `?`.
///
/// ```text
/// Page ---x: 0 --- 4
/// Page ---0: b'?hel'
/// Page ---1: b'lo c'
/// Page ---2: b'arl?'
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDump {
    addr: Address,
    page_size: usize,
    data: Vec<u8>,
}

impl PageDump {
    pub fn new(addr: Address, page_size: usize, data: Vec<u8>) -> Self {
        assert!(page_size > 0);
        Self {
            addr,
            page_size,
            data,
        }
    }

    pub fn addr(&self) -> Address {
        self.addr
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Indexes of the pages touched by the dumped range.
    pub fn pages(&self) -> core::ops::Range<usize> {
        if self.data.is_empty() {
            return 0..0;
        }
        let last = self.addr + self.data.len() - 1;
        (self.addr / self.page_size)..(last / self.page_size + 1)
    }
}

impl fmt::Display for PageDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page ---x: 0 --- {}", self.page_size)?;
        for page in self.pages() {
            write!(f, "Page ---{}: b'", page)?;
            let start = page * self.page_size;
            for pos in start..(start + self.page_size) {
                match pos.checked_sub(self.addr).and_then(|idx| self.data.get(idx)) {
                    Some(b'"') => f.write_str("\"")?,
                    Some(byte) => write!(f, "{}", byte.escape_ascii())?,
                    None => f.write_str("?")?,
                }
            }
            writeln!(f, "'")?;
        }
        Ok(())
    }
}
