use core::ops::Range;

use crate::Address;

/// One bus write that stays inside a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Device address of the first byte.
    pub addr: Address,
    /// Bytes of the payload covered by this segment.
    pub range: Range<usize>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Splits `len` bytes starting at `addr` into page-bounded segments.
///
/// The first segment runs up to the end of the page `addr` falls in, every
/// following one starts on a page boundary and covers at most a page.
#[derive(Debug, Clone)]
pub struct PageSegments {
    addr: Address,
    len: usize,
    page_size: usize,
    offset: usize,
}

impl PageSegments {
    pub fn new(addr: Address, len: usize, page_size: usize) -> Self {
        assert!(page_size > 0);
        Self {
            addr,
            len,
            page_size,
            offset: 0,
        }
    }
}

impl Iterator for PageSegments {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.offset >= self.len {
            return None;
        }

        let addr = self.addr + self.offset;
        let page_offset = addr % self.page_size;
        let chunk = usize::min(self.len - self.offset, self.page_size - page_offset);
        let range = self.offset..(self.offset + chunk);
        self.offset += chunk;

        Some(Segment { addr, range })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.offset >= self.len {
            return (0, Some(0));
        }
        let first = self.addr + self.offset;
        let last = self.addr + self.len - 1;
        let pages = last / self.page_size - first / self.page_size + 1;
        (pages, Some(pages))
    }
}

impl ExactSizeIterator for PageSegments {}
