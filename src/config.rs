/// Default 7-bit bus address, all address pins tied low.
pub const DEFAULT_ADDRESS: u8 = 0x50;
pub const DEFAULT_PAGES: usize = 128;
pub const DEFAULT_PAGE_SIZE: usize = 32;

/// Largest page of the family (AT24CM01/AT24CM02).
pub const MAX_PAGE_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    At24c01,
    At24c02,
    At24c04,
    At24c08,
    At24c16,
    At24c32,
    At24c64,
    At24c128,
    At24c256,
    At24c512,
    At24cm01,
    At24cm02,
}

impl Variant {
    /// Looks a variant up by the numeric part of its name, i.e. the
    /// capacity in kbit: `32` for AT24C32, `1024` for AT24CM01.
    pub fn from_code(code: usize) -> Option<Variant> {
        let variant = match code {
            1 => Variant::At24c01,
            2 => Variant::At24c02,
            4 => Variant::At24c04,
            8 => Variant::At24c08,
            16 => Variant::At24c16,
            32 => Variant::At24c32,
            64 => Variant::At24c64,
            128 => Variant::At24c128,
            256 => Variant::At24c256,
            512 => Variant::At24c512,
            1024 => Variant::At24cm01,
            2048 => Variant::At24cm02,
            _ => return None,
        };
        Some(variant)
    }

    pub fn pages(&self) -> usize {
        match self {
            Variant::At24c01 => 16,
            Variant::At24c02 | Variant::At24c04 => 32,
            Variant::At24c08 => 64,
            Variant::At24c16 | Variant::At24c32 => 128,
            Variant::At24c64 | Variant::At24c128 => 256,
            Variant::At24c256 | Variant::At24c512 | Variant::At24cm01 => 512,
            Variant::At24cm02 => 1024,
        }
    }

    pub fn page_size(&self) -> usize {
        match self {
            Variant::At24c01 | Variant::At24c02 => 8,
            Variant::At24c04 | Variant::At24c08 | Variant::At24c16 => 16,
            Variant::At24c32 | Variant::At24c64 => 32,
            Variant::At24c128 | Variant::At24c256 => 64,
            Variant::At24c512 => 128,
            Variant::At24cm01 | Variant::At24cm02 => 256,
        }
    }

    pub fn capacity(&self) -> usize {
        self.pages() * self.page_size()
    }

    /// Width of the memory address sent on the wire. Address bits above
    /// it travel in the block-select bits of the device address.
    pub fn address_bytes(&self) -> usize {
        match self {
            Variant::At24c01
            | Variant::At24c02
            | Variant::At24c04
            | Variant::At24c08
            | Variant::At24c16 => 1,
            _ => 2,
        }
    }
}

/// Device address and geometry of one EEPROM.
///
/// Starts from the AT24C32 layout or from a [`Variant`]; the builder
/// methods override single values afterwards:
///
/// ```
/// use at24::{DeviceConfig, Variant};
///
/// let config = DeviceConfig::from(Variant::At24c256).address(0x51).pages(256);
/// assert_eq!(config.capacity(), 256 * 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    pub address: u8,
    pub pages: usize,
    pub page_size: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            pages: DEFAULT_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<Variant> for DeviceConfig {
    fn from(variant: Variant) -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            pages: variant.pages(),
            page_size: variant.page_size(),
        }
    }
}

impl DeviceConfig {
    pub fn new(address: u8, pages: usize, page_size: usize) -> Self {
        Self {
            address,
            pages,
            page_size,
        }
    }

    pub fn address(self, address: u8) -> Self {
        Self { address, ..self }
    }

    pub fn pages(self, pages: usize) -> Self {
        Self { pages, ..self }
    }

    pub fn page_size(self, page_size: usize) -> Self {
        Self { page_size, ..self }
    }

    pub fn capacity(&self) -> usize {
        self.pages * self.page_size
    }
}
