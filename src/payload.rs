use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

/// Data accepted by [`Eeprom::write`](crate::Eeprom::write) and
/// [`Eeprom::update`](crate::Eeprom::update).
///
/// Every variant stands for a plain byte sequence: text is stored as its
/// UTF-8 encoding, integers one byte per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
    Ints(&'a [i32]),
}

impl<'a> Payload<'a> {
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Bytes(bytes) => bytes.len(),
            Payload::Ints(ints) => ints.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonical byte form. Fails with the position and value of the first
    /// integer that does not fit into a byte.
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>, (usize, i32)> {
        match *self {
            Payload::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
            Payload::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Payload::Ints(ints) => ints
                .iter()
                .enumerate()
                .map(|(idx, val)| u8::try_from(*val).map_err(|_| (idx, *val)))
                .collect::<Result<Vec<u8>, _>>()
                .map(Cow::Owned),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(text: &'a String) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Payload<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<'a> From<&'a [i32]> for Payload<'a> {
    fn from(ints: &'a [i32]) -> Self {
        Payload::Ints(ints)
    }
}

impl<'a, const N: usize> From<&'a [i32; N]> for Payload<'a> {
    fn from(ints: &'a [i32; N]) -> Self {
        Payload::Ints(ints)
    }
}
